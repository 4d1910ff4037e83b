mod errors;
mod internal;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;
use crate::username_string::UsernameString;

pub use errors::SessionStorageError;
pub use internal::{ProductionSessionStorage, SessionStorageImpl};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    pub session_id: Uuid,
    pub username: UsernameString,
    pub token: Vec<u8>,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

impl Session {
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at <= now
    }
}

/// Browser sessions, looked up by the token stored in the session cookie.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn create_session(
        &self,
        username: &UsernameString,
        created_at: OffsetDateTime,
        expires_at: OffsetDateTime,
    ) -> Result<Session, SessionStorageError>;

    /// Expired sessions are reported as missing.
    async fn get_session_by_token(
        &self,
        token: &[u8],
        now: OffsetDateTime,
    ) -> Result<Option<Session>, SessionStorageError>;

    /// `false` if there was no such session.
    async fn delete_session(
        &self,
        token: &[u8],
    ) -> Result<bool, SessionStorageError>;
}
