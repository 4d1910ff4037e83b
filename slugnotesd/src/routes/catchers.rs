use log::debug;
use rocket::response::Redirect;
use rocket::{catch, Request};
use crate::authentication_guard::CurrentUser;
use crate::endpoint::Endpoint;
use crate::http::{percent_encode, HtmlPage};
use crate::views::{Nav, NotFoundPage};

/// Anonymous access to a protected page.
#[catch(401)]
pub fn unauthorized(request: &Request<'_>) -> Redirect {
    let next = request.uri().to_string();
    debug!("redirecting anonymous request for {next} to login");
    Redirect::found(format!("{}?next={}", Endpoint::Login, percent_encode(&next)))
}

#[catch(404)]
pub async fn not_found(request: &Request<'_>) -> HtmlPage<NotFoundPage> {
    let user = request.guard::<Option<CurrentUser>>()
        .await
        .succeeded()
        .flatten();
    HtmlPage(NotFoundPage { nav: Nav::new(user.as_ref()) })
}
