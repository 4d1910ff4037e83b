//! Page contexts rendered with the templates under `templates/`.

use askama::Template;
use slugnotes::data::Note;
use slugnotes::username_string::UsernameString;
use crate::authentication_guard::CurrentUser;
use crate::endpoint::Endpoint;
use crate::forms::{AuthenticationForm, NoteForm, RegistrationForm};

/// The header shared by all the pages.
#[derive(Clone, Debug)]
pub struct Nav {
    pub user: Option<UsernameString>,
    pub home_url: String,
    pub list_url: String,
    pub add_url: String,
    pub login_url: String,
    pub logout_url: String,
    pub signup_url: String,
}

impl Nav {
    pub fn new(user: Option<&CurrentUser>) -> Self {
        Nav {
            user: user.map(|user| user.username.clone()),
            home_url: Endpoint::Home.to_string(),
            list_url: Endpoint::List.to_string(),
            add_url: Endpoint::Add.to_string(),
            login_url: Endpoint::Login.to_string(),
            logout_url: Endpoint::Logout.to_string(),
            signup_url: Endpoint::Signup.to_string(),
        }
    }

    pub fn anonymous() -> Self {
        Nav::new(None)
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub nav: Nav,
}

#[derive(Template)]
#[template(path = "note_form.html")]
pub struct NoteFormPage {
    pub nav: Nav,
    pub form: NoteForm,
    pub action: String,
    pub is_edit: bool,
    pub max_title_len: usize,
    pub max_slug_len: usize,
}

#[derive(Template)]
#[template(path = "note_detail.html")]
pub struct NoteDetailPage {
    pub nav: Nav,
    pub note: Note,
    pub edit_url: String,
    pub delete_url: String,
}

impl NoteDetailPage {
    pub fn new(user: &CurrentUser, note: Note) -> Self {
        NoteDetailPage {
            nav: Nav::new(Some(user)),
            edit_url: Endpoint::Edit(&note.slug).to_string(),
            delete_url: Endpoint::Delete(&note.slug).to_string(),
            note,
        }
    }
}

#[derive(Clone, Debug)]
pub struct NoteListItem {
    pub title: String,
    pub slug: String,
    pub url: String,
}

impl From<&Note> for NoteListItem {
    fn from(note: &Note) -> Self {
        NoteListItem {
            title: note.title.clone(),
            slug: note.slug.to_string(),
            url: Endpoint::Detail(&note.slug).to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "note_list.html")]
pub struct NoteListPage {
    pub nav: Nav,
    pub notes: Vec<NoteListItem>,
}

#[derive(Template)]
#[template(path = "note_delete.html")]
pub struct NoteDeletePage {
    pub nav: Nav,
    pub note: Note,
    pub action: String,
}

#[derive(Template)]
#[template(path = "success.html")]
pub struct SuccessPage {
    pub nav: Nav,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub nav: Nav,
    pub form: AuthenticationForm,
    pub action: String,
}

#[derive(Template)]
#[template(path = "logout.html")]
pub struct LogoutPage {
    pub nav: Nav,
}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupPage {
    pub nav: Nav,
    pub form: RegistrationForm,
    pub action: String,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub nav: Nav,
}
