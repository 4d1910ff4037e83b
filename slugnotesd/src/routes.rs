pub mod notes;
pub mod auth;
pub mod catchers;

use log::error;
use rocket::http::Status;
use rocket::{catchers, routes, Build, Rocket};
use crate::app_constants::{AUTH_PREFIX, NOTES_PREFIX};

pub trait SlugnotesRocketBuildExt {
    /// Mounts the pages and the catchers. The stores and the app config
    /// have to be managed already.
    fn install_slugnotes(self) -> Self;
}

impl SlugnotesRocketBuildExt for Rocket<Build> {
    fn install_slugnotes(self) -> Self {
        self
            .mount(
                NOTES_PREFIX,
                routes![
                    notes::home,
                    notes::add_form,
                    notes::add,
                    notes::edit_form,
                    notes::edit,
                    notes::detail,
                    notes::delete_form,
                    notes::delete,
                    notes::list,
                    notes::success,
                ],
            )
            .mount(
                AUTH_PREFIX,
                routes![
                    auth::login_form,
                    auth::login,
                    auth::logout_page,
                    auth::logout,
                    auth::signup_form,
                    auth::signup,
                ],
            )
            .register(
                "/",
                catchers![
                    catchers::unauthorized,
                    catchers::not_found,
                ],
            )
    }
}

/// Logs an unexpected store failure, the client only gets a 500.
pub(crate) fn internal_error(e: impl std::fmt::Display) -> Status {
    error!("request failed: {e}");
    Status::InternalServerError
}
