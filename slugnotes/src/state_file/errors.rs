use thiserror::Error;
use tokio::io::Error as IoError;

#[derive(Debug, Error)]
pub enum StateFileError {
    #[error("data directory is not initialized properly")]
    DataDirNotInitialized,

    #[error(transparent)]
    Io(#[from] IoError),

    #[error("invalid state file contents: {0}")]
    Parsing(#[from] toml::de::Error),

    #[error("inconsistent state file contents: {0}")]
    Inconsistent(String),

    #[error("serializing the state failed: {0}")]
    Serialization(#[from] toml::ser::Error),
}
