use thiserror::Error;
use crate::state_file::StateFileError;

#[derive(Debug, Error)]
pub enum SessionStorageError {
    #[error(transparent)]
    StateFile(#[from] StateFileError),
}
