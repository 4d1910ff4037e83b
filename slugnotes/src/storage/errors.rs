use thiserror::Error;
use crate::slug_string::SlugString;
use crate::state_file::StateFileError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    StateFile(#[from] StateFileError),

    #[error("slug \"{0}\" is already taken")]
    SlugTaken(SlugString),

    #[error("note not found")]
    NoteNotFound,
}
