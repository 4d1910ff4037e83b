use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::config::hasher_config::ProductionHasherConfigData;
use crate::lib_constants::{DEFAULT_DATA_DIRECTORY, DEFAULT_MAX_SLUG_LEN, DEFAULT_MAX_TITLE_LEN, DEFAULT_SESSION_TTL_SECS};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AppConfig {
    #[serde(default = "app_config_default_data_directory")]
    pub data_directory: PathBuf,

    #[serde(default = "app_config_default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    #[serde(default = "app_config_default_max_title_len")]
    pub max_title_len: usize,

    #[serde(default = "app_config_default_max_slug_len")]
    pub max_slug_len: usize,

    #[serde(flatten)]
    pub hasher_config: ProductionHasherConfigData,
}

impl AppConfig {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

pub fn app_config_default_data_directory() -> PathBuf {
    DEFAULT_DATA_DIRECTORY.into()
}

pub fn app_config_default_session_ttl_secs() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

pub fn app_config_default_max_title_len() -> usize {
    DEFAULT_MAX_TITLE_LEN
}

pub fn app_config_default_max_slug_len() -> usize {
    DEFAULT_MAX_SLUG_LEN
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_directory: app_config_default_data_directory(),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            max_title_len: DEFAULT_MAX_TITLE_LEN,
            max_slug_len: DEFAULT_MAX_SLUG_LEN,
            hasher_config: ProductionHasherConfigData::default(),
        }
    }
}
