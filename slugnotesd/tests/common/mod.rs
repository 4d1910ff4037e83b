#![allow(dead_code)]

use std::str::FromStr;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use rocket::http::{ContentType, Cookie, Status};
use rocket::local::asynchronous::{Client, LocalResponse};
use rocket::config::LogLevel;
use rocket::figment::Figment;
use slugnotes::config::app_config::AppConfig;
use slugnotes::config::figment::FigmentExt;
use slugnotes::data::{NewNote, Note};
use slugnotes::session_storage::SessionStorage;
use slugnotes::slug_string::SlugString;
use slugnotes::storage::NoteStorage;
use slugnotes::user_db::UserDb;
use slugnotes::username_string::UsernameString;
use slugnotesd::app_constants::SESSION_COOKIE_NAME;
use slugnotesd::app_setup::AppSetupFairing;
use slugnotesd::authentication_guard::encode_session_token;
use slugnotesd::http::percent_encode;
use time::{Duration, OffsetDateTime};

pub const AUTHOR: &str = "author";
pub const READER: &str = "reader";
pub const PASSWORD: &str = "correct horse battery";

pub const NOTE_TITLE: &str = "Заголовок";
pub const NOTE_TEXT: &str = "Текст";
pub const NOTE_SLUG: &str = "note-slug";

/// The app over a temporary data directory, with the real stores.
pub struct TestApp {
    pub client: Client,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> TestApp {
        let dir = TempDir::new().unwrap();
        let config_file = dir.child("slugnotes.toml");
        config_file
            .write_str(
                &format!(
                    "data_directory = \"{}\"\n\
                        argon2_m_cost = 8\n\
                        argon2_t_cost = 1\n\
                        argon2_p_cost = 1\n",
                    dir.path().display(),
                )
            )
            .unwrap();
        let figment = Figment
            ::from(
                rocket::Config {
                    log_level: LogLevel::Off,
                    ..rocket::Config::debug_default()
                }
            )
            .setup_app_config(config_file.path());
        let app_config: AppConfig = figment.extract().expect("invalid app config");
        let rocket = rocket::custom(figment)
            .attach(AppSetupFairing::new(app_config));
        TestApp {
            client: Client::untracked(rocket).await.expect("invalid rocket instance"),
            _dir: dir,
        }
    }

    /// The app with the author, the reader and the author's note.
    pub async fn with_note() -> (TestApp, Cookie<'static>, Cookie<'static>) {
        let app = TestApp::new().await;
        let author = app.login_as(AUTHOR).await;
        let reader = app.login_as(READER).await;
        app.create_note(AUTHOR, NOTE_TITLE, NOTE_TEXT, NOTE_SLUG).await;
        (app, author, reader)
    }

    pub fn notes(&self) -> &dyn NoteStorage {
        self.client.rocket()
            .state::<Box<dyn NoteStorage>>()
            .expect("note storage is not managed")
            .as_ref()
    }

    pub fn users(&self) -> &dyn UserDb {
        self.client.rocket()
            .state::<Box<dyn UserDb>>()
            .expect("user db is not managed")
            .as_ref()
    }

    pub fn sessions(&self) -> &dyn SessionStorage {
        self.client.rocket()
            .state::<Box<dyn SessionStorage>>()
            .expect("session storage is not managed")
            .as_ref()
    }

    pub async fn create_user(&self, username: &str) {
        let username = UsernameString::from_str(username).unwrap();
        if !self.users().does_user_exist(&username).await.unwrap() {
            self.users().create_user(&username, PASSWORD).await.unwrap();
        }
    }

    /// Creates the user if needed and returns a session cookie for them.
    pub async fn login_as(&self, username: &str) -> Cookie<'static> {
        self.create_user(username).await;
        let now = OffsetDateTime::now_utc();
        let session = self.sessions()
            .create_session(
                &UsernameString::from_str(username).unwrap(),
                now,
                now + Duration::hours(1),
            )
            .await
            .unwrap();
        Cookie::new(SESSION_COOKIE_NAME, encode_session_token(&session.token))
    }

    pub async fn create_note(
        &self,
        author: &str,
        title: &str,
        text: &str,
        slug: &str,
    ) -> Note {
        self.notes()
            .create_note(
                &UsernameString::from_str(author).unwrap(),
                NewNote {
                    title: title.into(),
                    text: text.into(),
                    slug: SlugString::from_str(slug).unwrap(),
                },
            )
            .await
            .unwrap()
    }

    pub async fn get_note(&self, author: &str, slug: &str) -> Option<Note> {
        self.notes()
            .get_note(&UsernameString::from_str(author).unwrap(), slug)
            .await
            .unwrap()
    }

    pub async fn note_count(&self) -> usize {
        self.notes().count_notes().await
    }

    pub async fn get(
        &self,
        uri: &str,
        cookie: Option<&Cookie<'static>>,
    ) -> LocalResponse<'_> {
        let mut request = self.client.get(uri.to_owned());
        if let Some(cookie) = cookie {
            request = request.cookie(cookie.clone());
        }
        request.dispatch().await
    }

    pub async fn post_form(
        &self,
        uri: &str,
        cookie: Option<&Cookie<'static>>,
        fields: &[(&str, &str)],
    ) -> LocalResponse<'_> {
        let mut request = self.client.post(uri.to_owned())
            .header(ContentType::Form)
            .body(form_body(fields));
        if let Some(cookie) = cookie {
            request = request.cookie(cookie.clone());
        }
        request.dispatch().await
    }

    pub async fn delete(
        &self,
        uri: &str,
        cookie: Option<&Cookie<'static>>,
    ) -> LocalResponse<'_> {
        let mut request = self.client.delete(uri.to_owned());
        if let Some(cookie) = cookie {
            request = request.cookie(cookie.clone());
        }
        request.dispatch().await
    }
}

pub fn form_body(fields: &[(&str, &str)]) -> String {
    fields.iter()
        .map(|(name, value)| format!("{name}={}", percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn location<'a>(response: &'a LocalResponse<'_>) -> Option<&'a str> {
    response.headers().get_one("Location")
}

pub fn login_redirect(uri: &str) -> String {
    format!("/auth/login?next={}", percent_encode(uri))
}

pub fn assert_login_redirect(response: &LocalResponse<'_>, uri: &str) {
    assert_eq!(response.status(), Status::Found, "for {uri}");
    assert_eq!(location(response), Some(login_redirect(uri).as_str()), "for {uri}");
}
