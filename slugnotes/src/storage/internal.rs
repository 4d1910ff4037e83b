use async_trait::async_trait;
use indexmap::IndexMap;
use log::{debug, trace};
use time::OffsetDateTime;
use tokio::sync::RwLock;
use crate::config::app_config::AppConfig;
use crate::data::{NewNote, Note, NoteUpdate};
use crate::lib_constants::NOTES_FILE_PATH;
use crate::rng::make_uuid;
use crate::slug_string::SlugString;
use crate::state_file::{StateFileError, StateFileIo, TomlStateFile};
use crate::storage::errors::StorageError;
use crate::storage::NoteStorage;
use crate::username_string::UsernameString;
use data::NotesData;

mod data;
#[cfg(test)] mod tests;

pub type ProductionNoteStorage = NoteStorageImpl<TomlStateFile>;

#[allow(private_bounds)]
pub struct NoteStorageImpl<Io: StateFileIo<NotesData>> {
    state: RwLock<State>,
    io: Io,
}

#[derive(Clone, Default)]
struct State {
    // insertion order is the creation order
    notes: IndexMap<SlugString, Note>,
}

impl ProductionNoteStorage {
    pub async fn new(
        app_config: &AppConfig,
    ) -> Result<ProductionNoteStorage, StorageError> {
        Self::load(
            TomlStateFile::new(&app_config.data_directory, NOTES_FILE_PATH)
                .await?,
        ).await
    }
}

#[allow(private_bounds)]
impl<Io: StateFileIo<NotesData>> NoteStorageImpl<Io> {
    pub(crate) async fn load(io: Io) -> Result<Self, StorageError> {
        let state: State = io.read_state()
            .await?
            .map(State::try_from)
            .transpose()?
            .unwrap_or_default();
        debug!("loaded {} notes", state.notes.len());
        Ok(
            NoteStorageImpl {
                state: RwLock::new(state),
                io,
            }
        )
    }

    async fn write_state(&self, state: &State) -> Result<(), StorageError> {
        Ok(self.io.write_state(&NotesData::from(state)).await?)
    }
}

fn find_authored<'a>(
    state: &'a State,
    author: &UsernameString,
    slug: &str,
) -> Option<&'a Note> {
    state.notes
        .get(slug)
        .filter(|note| note.author == *author)
}

#[allow(private_bounds)]
#[async_trait]
impl<Io: StateFileIo<NotesData>> NoteStorage for NoteStorageImpl<Io> {
    async fn create_note(
        &self,
        author: &UsernameString,
        note: NewNote,
    ) -> Result<Note, StorageError> {
        debug!("creating note \"{}\" for user \"{author}\"", note.slug);
        let mut state = self.state.write().await;
        if state.notes.contains_key(&note.slug) {
            return Err(StorageError::SlugTaken(note.slug))
        }
        let note = Note {
            id: make_uuid(&mut rand::rng()),
            title: note.title,
            text: note.text,
            slug: note.slug,
            author: author.clone(),
            created_at: OffsetDateTime::now_utc(),
        };
        let mut updated = state.clone();
        updated.notes.insert(note.slug.clone(), note.clone());
        self.write_state(&updated).await?;
        *state = updated;
        trace!("created note {} with slug \"{}\"", note.id, note.slug);
        Ok(note)
    }

    async fn get_note(
        &self,
        author: &UsernameString,
        slug: &str,
    ) -> Result<Option<Note>, StorageError> {
        trace!("reading note \"{slug}\" for user \"{author}\"");
        Ok(
            find_authored(&*self.state.read().await, author, slug)
                .cloned()
        )
    }

    async fn list_notes(
        &self,
        author: &UsernameString,
    ) -> Result<Vec<Note>, StorageError> {
        debug!("listing notes for user \"{author}\"");
        Ok(
            self.state
                .read()
                .await
                .notes
                .values()
                .filter(|note| note.author == *author)
                .cloned()
                .collect()
        )
    }

    async fn update_note(
        &self,
        author: &UsernameString,
        slug: &str,
        update: NoteUpdate,
    ) -> Result<Note, StorageError> {
        debug!("updating note \"{slug}\" for user \"{author}\"");
        let mut state = self.state.write().await;
        let mut note = find_authored(&state, author, slug)
            .cloned()
            .ok_or(StorageError::NoteNotFound)?;
        if let Some(new_slug) = update.slug
            && *new_slug != *slug
        {
            if state.notes.contains_key(&new_slug) {
                return Err(StorageError::SlugTaken(new_slug))
            }
            note.slug = new_slug;
        }
        if let Some(title) = update.title {
            note.title = title;
        }
        if let Some(text) = update.text {
            note.text = text;
        }

        let mut updated = state.clone();
        let Some((index, _, _)) = updated.notes.shift_remove_full(slug) else {
            return Err(StorageError::NoteNotFound)
        };
        updated.notes.shift_insert(index, note.slug.clone(), note.clone());
        self.write_state(&updated).await?;
        *state = updated;
        Ok(note)
    }

    async fn delete_note(
        &self,
        author: &UsernameString,
        slug: &str,
    ) -> Result<(), StorageError> {
        debug!("deleting note \"{slug}\" for user \"{author}\"");
        let mut state = self.state.write().await;
        if find_authored(&state, author, slug).is_none() {
            return Err(StorageError::NoteNotFound)
        }
        let mut updated = state.clone();
        updated.notes.shift_remove(slug);
        self.write_state(&updated).await?;
        *state = updated;
        Ok(())
    }

    async fn count_notes(&self) -> usize {
        self.state.read().await.notes.len()
    }
}

impl TryFrom<NotesData> for State {
    type Error = StateFileError;

    fn try_from(value: NotesData) -> Result<Self, Self::Error> {
        let mut notes = IndexMap::with_capacity(value.notes.len());
        for note in value.notes.into_iter().map(Note::from) {
            if notes.contains_key(&note.slug) {
                return Err(
                    StateFileError::Inconsistent(
                        format!("slug \"{}\" is used by more than one note", note.slug)
                    )
                )
            }
            notes.insert(note.slug.clone(), note);
        }
        Ok(State { notes })
    }
}

impl From<&State> for NotesData {
    fn from(value: &State) -> Self {
        NotesData {
            notes: value.notes
                .values()
                .map(Into::into)
                .collect(),
        }
    }
}
