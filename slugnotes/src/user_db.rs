mod errors;
mod internal;

use async_trait::async_trait;
use crate::username_string::UsernameString;

pub use errors::UserDbError;
pub use internal::{ProductionUserDb, UserDbImpl};

#[async_trait]
pub trait UserDb: Send + Sync {
    async fn does_user_exist(
        &self,
        username: &UsernameString,
    ) -> Result<bool, UserDbError>;

    /// `false` for unknown users as well as for wrong passwords.
    async fn check_user_credentials(
        &self,
        username: &UsernameString,
        password: &str,
    ) -> Result<bool, UserDbError>;

    async fn create_user(
        &self,
        username: &UsernameString,
        password: &str,
    ) -> Result<(), UserDbError>;

    async fn count_users(&self) -> usize;
}
