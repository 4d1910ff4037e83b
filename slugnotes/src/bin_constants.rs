pub const DEFAULT_CONFIG_FILE: &str = "/etc/slugnotes/slugnotes.toml";
pub const APP_CONFIG_ENV_PREFIX: &str = "SLUGNOTES_";
