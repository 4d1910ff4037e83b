use std::str::FromStr;
use rocket::FromForm;
use slugnotes::username_string::{UsernameParseError, UsernameString};
use crate::app_constants::MIN_PASSWORD_LEN;
use crate::forms::{FormErrors, REQUIRED_MESSAGE};

pub const INVALID_LOGIN_MESSAGE: &str = "Please enter a correct username and password. \
    Note that both fields may be case-sensitive.";
pub const USER_EXISTS_MESSAGE: &str = "A user with that username already exists.";

#[derive(Clone, Debug, Default, FromForm)]
pub struct LoginFormData {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// The login form, the password is never rendered back.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AuthenticationForm {
    pub username: String,
    pub errors: FormErrors,
}

#[derive(Clone, Debug, Default, FromForm)]
pub struct SignupFormData {
    pub username: Option<String>,
    pub password1: Option<String>,
    pub password2: Option<String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RegistrationForm {
    pub username: String,
    pub errors: FormErrors,
}

impl LoginFormData {
    /// A malformed username can't belong to anybody, so it's reported the
    /// same way as wrong credentials.
    pub fn credentials(&self) -> Result<(UsernameString, &str), FormErrors> {
        let mut errors = FormErrors::default();
        let username = required(self.username.as_deref(), "username", &mut errors);
        let password = required(self.password.as_deref(), "password", &mut errors);
        let (Some(username), Some(password)) = (username, password) else {
            return Err(errors)
        };
        match UsernameString::from_str(username.trim()) {
            Ok(username) => Ok((username, password)),
            Err(_) => {
                errors.add_non_field(INVALID_LOGIN_MESSAGE);
                Err(errors)
            },
        }
    }

    pub fn to_form(&self, errors: FormErrors) -> AuthenticationForm {
        AuthenticationForm {
            username: self.username.clone().unwrap_or_default(),
            errors,
        }
    }
}

impl SignupFormData {
    /// Checks everything but the username being unique.
    pub fn validate(&self) -> Result<(UsernameString, &str), FormErrors> {
        let mut errors = FormErrors::default();
        let username = required(self.username.as_deref(), "username", &mut errors)
            .and_then(|username|
                UsernameString::from_str(username.trim())
                    .map_err(|e| errors.add("username", username_error_message(&e)))
                    .ok()
            );
        let password1 = required(self.password1.as_deref(), "password1", &mut errors);
        let password2 = required(self.password2.as_deref(), "password2", &mut errors);
        if let Some(password) = password1 {
            validate_password(password, &mut errors);
        }
        if let (Some(password1), Some(password2)) = (password1, password2)
            && password1 != password2
        {
            errors.add("password2", "The two password fields didn't match.");
        }
        match (username, password1) {
            (Some(username), Some(password)) => errors.into_result((username, password)),
            _ => Err(errors),
        }
    }

    pub fn to_form(&self, errors: FormErrors) -> RegistrationForm {
        RegistrationForm {
            username: self.username.clone().unwrap_or_default(),
            errors,
        }
    }
}

fn required<'a>(
    value: Option<&'a str>,
    field: &'static str,
    errors: &mut FormErrors,
) -> Option<&'a str> {
    let value = value.filter(|v| !v.trim().is_empty());
    if value.is_none() {
        errors.add(field, REQUIRED_MESSAGE);
    }
    value
}

fn username_error_message(e: &UsernameParseError) -> String {
    match e {
        UsernameParseError::TooLong => "Ensure this value has at most 150 characters.".into(),
        _ => "Enter a valid username. This value may contain only letters, \
            numbers, and @/./+/-/_ characters.".into(),
    }
}

fn validate_password(password: &str, errors: &mut FormErrors) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            "password1",
            format!(
                "This password is too short. It must contain at least \
                    {MIN_PASSWORD_LEN} characters.",
            ),
        );
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        errors.add("password1", "This password is entirely numeric.");
    }
}
