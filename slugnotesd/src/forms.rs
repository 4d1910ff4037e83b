//! Submitted form data, its validation, and the form objects the pages
//! render.

mod errors;
mod note;
mod account;

pub use errors::FormErrors;
pub use note::{slug_taken_message, NoteForm, NoteFormData};
pub use account::{AuthenticationForm, LoginFormData, RegistrationForm, SignupFormData};
pub use account::{INVALID_LOGIN_MESSAGE, USER_EXISTS_MESSAGE};

pub const REQUIRED_MESSAGE: &str = "This field is required.";
