use thiserror::Error;
use crate::hasher::HasherError;
use crate::state_file::StateFileError;
use crate::username_string::UsernameString;

#[derive(Debug, Error)]
pub enum UserDbError {
    #[error(transparent)]
    StateFile(#[from] StateFileError),

    #[error("hashing failed: {0}")]
    Hashing(#[from] HasherError),

    #[error("user \"{0}\" already exists")]
    UserExists(UsernameString),
}
