use async_trait::async_trait;
use base64ct::{Base64UrlUnpadded, Encoding};
use log::{error, trace};
use rocket::http::Status;
use rocket::outcome::try_outcome;
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};
use slugnotes::session_storage::SessionStorage;
use slugnotes::username_string::UsernameString;
use time::OffsetDateTime;
use crate::app_constants::SESSION_COOKIE_NAME;

/// The logged in user.
///
/// Fails with 401 without a valid session, the catcher turns it into
/// a redirect to the login page. Public pages take `Option<CurrentUser>`.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub username: UsernameString,
    pub session_token: Vec<u8>,
}

/// The token from the session cookie, whether it's valid or not.
#[derive(Debug)]
pub struct SessionCookie(pub Vec<u8>);

pub fn encode_session_token(token: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(token)
}

#[async_trait]
impl<'r> FromRequest<'r> for SessionCookie {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(cookie) = request.cookies().get(SESSION_COOKIE_NAME) else {
            return Outcome::Error((Status::Unauthorized, ()))
        };
        match Base64UrlUnpadded::decode_vec(cookie.value()) {
            Ok(token) => Outcome::Success(SessionCookie(token)),
            Err(_) => {
                trace!("malformed session cookie");
                Outcome::Error((Status::Unauthorized, ()))
            },
        }
    }
}

#[async_trait]
impl<'r> FromRequest<'r> for CurrentUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let SessionCookie(token) = try_outcome!(request.guard::<SessionCookie>().await);
        let sessions = try_outcome!(
            request.guard::<&State<Box<dyn SessionStorage>>>().await
        );
        match sessions.get_session_by_token(&token, OffsetDateTime::now_utc()).await {
            Ok(Some(session)) => Outcome::Success(
                CurrentUser {
                    username: session.username,
                    session_token: token,
                }
            ),
            Ok(None) => {
                trace!("unknown or expired session");
                Outcome::Error((Status::Unauthorized, ()))
            },
            Err(e) => {
                error!("failed to look up the session: {e}");
                Outcome::Error((Status::InternalServerError, ()))
            },
        }
    }
}
