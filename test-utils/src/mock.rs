use std::path::PathBuf;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use crate::ports::LOCAL_PORT;

pub const MOCK_PEPPER_STR: &str = "0Ig1jCE4DIAaJ/OGwFXz2YuvVVNy0M9QgOmFF6wbJIg=";

const CONFIG_FILE_REL_PATH: &str = "etc/slugnotes/slugnotes.toml";
const DATA_DIR_REL_PATH: &str = "var/slugnotes";

/// Lays out a config file, a pepper and an empty data directory. The daemon
/// is set to listen on the current thread's [`LOCAL_PORT`].
pub fn setup_basic_config() -> TempDir {
    let root = TempDir::new().unwrap();
    let config_dir = root.child("etc/slugnotes");
    config_dir.create_dir_all().unwrap();
    let data_dir = root.child(DATA_DIR_REL_PATH);
    data_dir.create_dir_all().unwrap();

    let pepper = config_dir.child("pepper.b64");
    pepper.write_str(MOCK_PEPPER_STR).unwrap();

    let config = format!(
        r#"data_directory = "{}"
pepper_path = "{}"
argon2_m_cost = 64
argon2_t_cost = 1
port = {}
"#,
        data_dir.to_str().unwrap(),
        pepper.to_str().unwrap(),
        LOCAL_PORT.with(|port| *port),
    );
    root.child(CONFIG_FILE_REL_PATH).write_str(&config).unwrap();

    root
}

pub(crate) fn config_file_path(dir: &TempDir) -> PathBuf {
    dir.join(CONFIG_FILE_REL_PATH)
}

pub fn url(path: &str) -> String {
    format!("http://localhost:{}{path}", LOCAL_PORT.with(|port| *port))
}
