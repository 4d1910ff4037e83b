use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use crate::data::Note;
use crate::slug_string::SlugString;
use crate::username_string::UsernameString;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NotesData {
    #[serde(rename = "note", default)]
    pub notes: Vec<NoteData>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NoteData {
    pub id: Uuid,
    pub slug: SlugString,
    pub author: UsernameString,
    pub title: String,
    pub text: String,

    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<NoteData> for Note {
    fn from(value: NoteData) -> Self {
        Note {
            id: value.id,
            title: value.title,
            text: value.text,
            slug: value.slug,
            author: value.author,
            created_at: value.created_at,
        }
    }
}

impl From<&Note> for NoteData {
    fn from(value: &Note) -> Self {
        NoteData {
            id: value.id,
            slug: value.slug.clone(),
            author: value.author.clone(),
            title: value.title.clone(),
            text: value.text.clone(),
            created_at: value.created_at,
        }
    }
}
