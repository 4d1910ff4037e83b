pub const SESSION_COOKIE_NAME: &str = "sessionid";

// mount points
pub const NOTES_PREFIX: &str = "/";
pub const AUTH_PREFIX: &str = "/auth";

pub const MIN_PASSWORD_LEN: usize = 8;

// form field that carries errors not bound to a specific input
pub const NON_FIELD_ERRORS: &str = "__all__";
