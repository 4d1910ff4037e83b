use log::{debug, info};
use rocket::form::Form;
use rocket::http::{Cookie, CookieJar, SameSite, Status};
use rocket::response::Redirect;
use rocket::{get, post, Either, State};
use slugnotes::config::app_config::AppConfig;
use slugnotes::session_storage::SessionStorage;
use slugnotes::user_db::{UserDb, UserDbError};
use time::OffsetDateTime;
use crate::app_constants::SESSION_COOKIE_NAME;
use crate::authentication_guard::{encode_session_token, CurrentUser, SessionCookie};
use crate::endpoint::Endpoint;
use crate::forms::{AuthenticationForm, FormErrors, LoginFormData, RegistrationForm, SignupFormData, INVALID_LOGIN_MESSAGE, USER_EXISTS_MESSAGE};
use crate::http::{local_redirect_target, percent_encode, HtmlPage};
use crate::routes::internal_error;
use crate::views::{LoginPage, LogoutPage, Nav, SignupPage};

type Users = State<Box<dyn UserDb>>;
type Sessions = State<Box<dyn SessionStorage>>;

#[get("/login?<next>")]
pub fn login_form(
    user: Option<CurrentUser>,
    next: Option<&str>,
) -> HtmlPage<LoginPage> {
    login_page(user.as_ref(), next, AuthenticationForm::default())
}

#[post("/login?<next>", data = "<data>")]
pub async fn login(
    next: Option<&str>,
    users: &Users,
    sessions: &Sessions,
    config: &State<AppConfig>,
    cookies: &CookieJar<'_>,
    data: Form<LoginFormData>,
) -> Result<Either<Redirect, HtmlPage<LoginPage>>, Status> {
    let (username, password) = match data.credentials() {
        Ok(credentials) => credentials,
        Err(errors) => return Ok(
            Either::Right(login_page(None, next, data.to_form(errors)))
        ),
    };
    let is_valid = users.check_user_credentials(&username, password)
        .await
        .map_err(internal_error)?;
    if !is_valid {
        debug!("failed login attempt for user \"{username}\"");
        let mut errors = FormErrors::default();
        errors.add_non_field(INVALID_LOGIN_MESSAGE);
        return Ok(Either::Right(login_page(None, next, data.to_form(errors))))
    }

    let created_at = OffsetDateTime::now_utc();
    let session = sessions
        .create_session(&username, created_at, created_at + config.session_ttl())
        .await
        .map_err(internal_error)?;
    cookies.add(
        Cookie::build((SESSION_COOKIE_NAME, encode_session_token(&session.token)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .expires(session.expires_at)
    );
    info!("user \"{username}\" logged in");

    let target = local_redirect_target(next)
        .map(str::to_owned)
        .unwrap_or_else(|| Endpoint::Home.to_string());
    Ok(Either::Left(Redirect::found(target)))
}

#[get("/logout")]
pub async fn logout_page(
    session: Option<SessionCookie>,
    sessions: &Sessions,
    cookies: &CookieJar<'_>,
) -> Result<HtmlPage<LogoutPage>, Status> {
    end_session(session, sessions, cookies).await
}

#[post("/logout")]
pub async fn logout(
    session: Option<SessionCookie>,
    sessions: &Sessions,
    cookies: &CookieJar<'_>,
) -> Result<HtmlPage<LogoutPage>, Status> {
    end_session(session, sessions, cookies).await
}

#[get("/signup")]
pub fn signup_form(user: Option<CurrentUser>) -> HtmlPage<SignupPage> {
    signup_page(user.as_ref(), RegistrationForm::default())
}

#[post("/signup", data = "<data>")]
pub async fn signup(
    users: &Users,
    data: Form<SignupFormData>,
) -> Result<Either<Redirect, HtmlPage<SignupPage>>, Status> {
    let (username, password) = match data.validate() {
        Ok(valid) => valid,
        Err(errors) => return Ok(
            Either::Right(signup_page(None, data.to_form(errors)))
        ),
    };
    match users.create_user(&username, password).await {
        Ok(()) => Ok(Either::Left(Redirect::found(Endpoint::Login.to_string()))),
        Err(UserDbError::UserExists(_)) => {
            let mut errors = FormErrors::default();
            errors.add("username", USER_EXISTS_MESSAGE);
            Ok(Either::Right(signup_page(None, data.to_form(errors))))
        },
        Err(e) => Err(internal_error(e)),
    }
}

async fn end_session(
    session: Option<SessionCookie>,
    sessions: &Sessions,
    cookies: &CookieJar<'_>,
) -> Result<HtmlPage<LogoutPage>, Status> {
    if let Some(SessionCookie(token)) = session {
        sessions.delete_session(&token)
            .await
            .map_err(internal_error)?;
        cookies.remove(Cookie::build(SESSION_COOKIE_NAME).path("/"));
    }
    Ok(HtmlPage(LogoutPage { nav: Nav::anonymous() }))
}

fn login_page(
    user: Option<&CurrentUser>,
    next: Option<&str>,
    form: AuthenticationForm,
) -> HtmlPage<LoginPage> {
    let action = match local_redirect_target(next) {
        Some(next) => format!("{}?next={}", Endpoint::Login, percent_encode(next)),
        None => Endpoint::Login.to_string(),
    };
    HtmlPage(
        LoginPage {
            nav: Nav::new(user),
            form,
            action,
        }
    )
}

fn signup_page(
    user: Option<&CurrentUser>,
    form: RegistrationForm,
) -> HtmlPage<SignupPage> {
    HtmlPage(
        SignupPage {
            nav: Nav::new(user),
            form,
            action: Endpoint::Signup.to_string(),
        }
    )
}
