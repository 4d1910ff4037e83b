pub const DEFAULT_DATA_DIRECTORY: &str = "/var/slugnotes";

// matches the length limits of the html forms
pub const DEFAULT_MAX_TITLE_LEN: usize = 100;
pub const DEFAULT_MAX_SLUG_LEN: usize = 100;
// rocket's own default of 32 KiB is too small for the note text
pub const DEFAULT_FORM_LIMIT: &str = "2MiB";
pub const MAX_USERNAME_LEN: usize = 150;

// two weeks
pub const DEFAULT_SESSION_TTL_SECS: u64 = 14 * 24 * 60 * 60;
pub const SESSION_TOKEN_SIZE: usize = 256 / 8;

// the defaults are taken from the argon2 crate itself
pub const DEFAULT_ARGON2_M_COST: u32 = 19 * 1024;
pub const DEFAULT_ARGON2_T_COST: u32 = 2;
pub const DEFAULT_ARGON2_P_COST: u32 = 1;
pub const DEFAULT_ARGON2_OUTPUT_LEN: Option<usize> = Some(32);

// relative to the data directory
pub const NOTES_FILE_PATH: &str = "notes.toml";
pub const USERS_FILE_PATH: &str = "users.toml";
pub const SESSIONS_FILE_PATH: &str = "sessions.toml";

pub const TMP_FILENAME_INFIX: &str = ".tmp.";
