use time::OffsetDateTime;
use uuid::Uuid;
use crate::slug_string::SlugString;
use crate::username_string::UsernameString;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub slug: SlugString,
    pub author: UsernameString,
    pub created_at: OffsetDateTime,
}

/// A validated note submission, the author comes from the session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewNote {
    pub title: String,
    pub text: String,
    pub slug: SlugString,
}

/// Fields left as `None` keep their stored values.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub text: Option<String>,
    pub slug: Option<SlugString>,
}
