mod errors;
mod internal;

use async_trait::async_trait;
use crate::data::{NewNote, Note, NoteUpdate};
use crate::username_string::UsernameString;

pub use errors::StorageError;
pub use internal::{NoteStorageImpl, ProductionNoteStorage};

/// Notes of all users, keyed by their globally unique slug.
///
/// Every lookup is scoped to an author: a note owned by somebody else is
/// indistinguishable from a missing one.
#[async_trait]
pub trait NoteStorage: Send + Sync {
    async fn create_note(
        &self,
        author: &UsernameString,
        note: NewNote,
    ) -> Result<Note, StorageError>;

    async fn get_note(
        &self,
        author: &UsernameString,
        slug: &str,
    ) -> Result<Option<Note>, StorageError>;

    /// The author's notes in creation order.
    async fn list_notes(
        &self,
        author: &UsernameString,
    ) -> Result<Vec<Note>, StorageError>;

    async fn update_note(
        &self,
        author: &UsernameString,
        slug: &str,
        update: NoteUpdate,
    ) -> Result<Note, StorageError>;

    async fn delete_note(
        &self,
        author: &UsernameString,
        slug: &str,
    ) -> Result<(), StorageError>;

    async fn count_notes(&self) -> usize;
}
