use log::{debug, info};
use rocket::form::Form;
use rocket::http::Status;
use rocket::response::Redirect;
use rocket::{delete, get, post, Either, State};
use slugnotes::config::app_config::AppConfig;
use slugnotes::data::Note;
use slugnotes::storage::{NoteStorage, StorageError};
use crate::authentication_guard::CurrentUser;
use crate::endpoint::Endpoint;
use crate::forms::{slug_taken_message, FormErrors, NoteForm, NoteFormData};
use crate::http::HtmlPage;
use crate::routes::internal_error;
use crate::views::{HomePage, Nav, NoteDeletePage, NoteDetailPage, NoteFormPage, NoteListItem, NoteListPage, SuccessPage};

type Storage = State<Box<dyn NoteStorage>>;
type FormOutcome = Result<Either<Redirect, HtmlPage<NoteFormPage>>, Status>;

#[get("/")]
pub fn home(user: Option<CurrentUser>) -> HtmlPage<HomePage> {
    HtmlPage(HomePage { nav: Nav::new(user.as_ref()) })
}

#[get("/add")]
pub fn add_form(
    user: CurrentUser,
    config: &State<AppConfig>,
) -> HtmlPage<NoteFormPage> {
    form_page(&user, config, Endpoint::Add, NoteForm::default())
}

#[post("/add", data = "<data>")]
pub async fn add(
    user: CurrentUser,
    storage: &Storage,
    config: &State<AppConfig>,
    data: Form<NoteFormData>,
) -> FormOutcome {
    let new_note = match data.to_new_note(config) {
        Ok(new_note) => new_note,
        Err(errors) => return Ok(
            Either::Right(
                form_page(
                    &user,
                    config,
                    Endpoint::Add,
                    NoteForm::from_submission(&data, None, errors),
                )
            )
        ),
    };
    match storage.create_note(&user.username, new_note).await {
        Ok(note) => {
            info!("user \"{}\" created note \"{}\"", user.username, note.slug);
            Ok(Either::Left(success_redirect()))
        },
        Err(StorageError::SlugTaken(slug)) => Ok(
            Either::Right(
                form_page(
                    &user,
                    config,
                    Endpoint::Add,
                    NoteForm::from_submission(&data, None, slug_taken(&slug)),
                )
            )
        ),
        Err(e) => Err(internal_error(e)),
    }
}

#[get("/edit/<slug>")]
pub async fn edit_form(
    user: CurrentUser,
    slug: &str,
    storage: &Storage,
    config: &State<AppConfig>,
) -> Result<HtmlPage<NoteFormPage>, Status> {
    let note = authored_note(storage, &user, slug).await?;
    Ok(form_page(&user, config, Endpoint::Edit(slug), NoteForm::from_note(&note)))
}

#[post("/edit/<slug>", data = "<data>")]
pub async fn edit(
    user: CurrentUser,
    slug: &str,
    storage: &Storage,
    config: &State<AppConfig>,
    data: Form<NoteFormData>,
) -> FormOutcome {
    let note = authored_note(storage, &user, slug).await?;
    let update = match data.to_note_update(config) {
        Ok(update) => update,
        Err(errors) => return Ok(
            Either::Right(
                form_page(
                    &user,
                    config,
                    Endpoint::Edit(slug),
                    NoteForm::from_submission(&data, Some(&note), errors),
                )
            )
        ),
    };
    match storage.update_note(&user.username, slug, update).await {
        Ok(note) => {
            info!("user \"{}\" updated note \"{}\"", user.username, note.slug);
            Ok(Either::Left(success_redirect()))
        },
        Err(StorageError::SlugTaken(taken)) => Ok(
            Either::Right(
                form_page(
                    &user,
                    config,
                    Endpoint::Edit(slug),
                    NoteForm::from_submission(&data, Some(&note), slug_taken(&taken)),
                )
            )
        ),
        Err(StorageError::NoteNotFound) => Err(Status::NotFound),
        Err(e) => Err(internal_error(e)),
    }
}

#[get("/note/<slug>")]
pub async fn detail(
    user: CurrentUser,
    slug: &str,
    storage: &Storage,
) -> Result<HtmlPage<NoteDetailPage>, Status> {
    let note = authored_note(storage, &user, slug).await?;
    Ok(HtmlPage(NoteDetailPage::new(&user, note)))
}

#[get("/delete/<slug>")]
pub async fn delete_form(
    user: CurrentUser,
    slug: &str,
    storage: &Storage,
) -> Result<HtmlPage<NoteDeletePage>, Status> {
    let note = authored_note(storage, &user, slug).await?;
    Ok(
        HtmlPage(
            NoteDeletePage {
                nav: Nav::new(Some(&user)),
                action: Endpoint::Delete(slug).to_string(),
                note,
            }
        )
    )
}

/// Html forms reach it through a POST with `_method=DELETE`.
#[delete("/delete/<slug>")]
pub async fn delete(
    user: CurrentUser,
    slug: &str,
    storage: &Storage,
) -> Result<Redirect, Status> {
    match storage.delete_note(&user.username, slug).await {
        Ok(()) => {
            info!("user \"{}\" deleted note \"{slug}\"", user.username);
            Ok(success_redirect())
        },
        Err(StorageError::NoteNotFound) => Err(Status::NotFound),
        Err(e) => Err(internal_error(e)),
    }
}

#[get("/notes")]
pub async fn list(
    user: CurrentUser,
    storage: &Storage,
) -> Result<HtmlPage<NoteListPage>, Status> {
    let notes = storage.list_notes(&user.username)
        .await
        .map_err(internal_error)?;
    Ok(
        HtmlPage(
            NoteListPage {
                nav: Nav::new(Some(&user)),
                notes: notes.iter().map(NoteListItem::from).collect(),
            }
        )
    )
}

#[get("/done")]
pub fn success(user: CurrentUser) -> HtmlPage<SuccessPage> {
    HtmlPage(SuccessPage { nav: Nav::new(Some(&user)) })
}

/// Somebody else's note is reported as missing.
async fn authored_note(
    storage: &Storage,
    user: &CurrentUser,
    slug: &str,
) -> Result<Note, Status> {
    storage.get_note(&user.username, slug)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| {
            debug!("note \"{slug}\" not found for user \"{}\"", user.username);
            Status::NotFound
        })
}

fn form_page(
    user: &CurrentUser,
    config: &AppConfig,
    action: Endpoint<'_>,
    form: NoteForm,
) -> HtmlPage<NoteFormPage> {
    HtmlPage(
        NoteFormPage {
            nav: Nav::new(Some(user)),
            form,
            is_edit: action != Endpoint::Add,
            action: action.to_string(),
            max_title_len: config.max_title_len,
            max_slug_len: config.max_slug_len,
        }
    )
}

fn slug_taken(slug: &str) -> FormErrors {
    let mut errors = FormErrors::default();
    errors.add("slug", slug_taken_message(slug));
    errors
}

fn success_redirect() -> Redirect {
    Redirect::found(Endpoint::Success.to_string())
}
