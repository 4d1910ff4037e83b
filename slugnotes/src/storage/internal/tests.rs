use std::str::FromStr;
use std::sync::Arc;
use crate::state_file::testing::MemoryStateFile;
use super::*;
use super::data::NoteData;

type TestStorage = NoteStorageImpl<Arc<MemoryStateFile<NotesData>>>;

fn username(name: &str) -> UsernameString {
    UsernameString::from_str(name).unwrap()
}

fn new_note(title: &str, text: &str, slug: &str) -> NewNote {
    NewNote {
        title: title.into(),
        text: text.into(),
        slug: SlugString::from_str(slug).unwrap(),
    }
}

async fn make_storage() -> (TestStorage, Arc<MemoryStateFile<NotesData>>) {
    let io = MemoryStateFile::new(None);
    let storage = NoteStorageImpl::load(io.clone())
        .await.expect("storage creation failed");
    (storage, io)
}

async fn make_storage_with_note() -> (TestStorage, Arc<MemoryStateFile<NotesData>>) {
    let (storage, io) = make_storage().await;
    storage.create_note(&username("author"), new_note("Title", "Text", "text"))
        .await.expect("note creation failed");
    (storage, io)
}

#[tokio::test]
async fn create_note_persists() {
    let (storage, io) = make_storage().await;
    let note = storage
        .create_note(
            &username("author"),
            new_note("Заголовок", "Текст", "zagolovok"),
        )
        .await.expect("note creation failed");
    assert_eq!(note.title, "Заголовок");
    assert_eq!(note.text, "Текст");
    assert_eq!(&*note.slug, "zagolovok");
    assert_eq!(note.author, username("author"));
    assert_eq!(storage.count_notes().await, 1);

    assert_eq!(io.write_count(), 1);
    let stored = io.stored().expect("nothing was written");
    assert_eq!(stored.notes.len(), 1);
    assert_eq!(stored.notes[0], NoteData::from(&note));
}

#[tokio::test]
async fn create_note_slug_taken() {
    let (storage, io) = make_storage_with_note().await;
    let err = storage
        .create_note(&username("reader"), new_note("Other", "Other", "text"))
        .await.expect_err("should fail");
    assert!(matches!(err, StorageError::SlugTaken(ref slug) if &**slug == "text"), "wrong error type: {err:#?}");
    assert_eq!(storage.count_notes().await, 1);
    assert_eq!(io.write_count(), 1);
}

#[tokio::test]
async fn create_note_write_failure_keeps_state() {
    let (storage, io) = make_storage().await;
    io.fail_writes();
    let err = storage
        .create_note(&username("author"), new_note("Title", "Text", "text"))
        .await.expect_err("should fail");
    assert!(matches!(err, StorageError::StateFile(_)), "wrong error type: {err:#?}");
    assert_eq!(storage.count_notes().await, 0);
}

#[tokio::test]
async fn get_note_only_for_author() {
    let (storage, _) = make_storage_with_note().await;
    let note = storage.get_note(&username("author"), "text")
        .await.unwrap()
        .expect("the author should see the note");
    assert_eq!(note.title, "Title");
    assert_eq!(storage.get_note(&username("reader"), "text").await.unwrap(), None);
    assert_eq!(storage.get_note(&username("author"), "missing").await.unwrap(), None);
}

#[tokio::test]
async fn list_notes_in_creation_order() {
    let (storage, _) = make_storage().await;
    let author = username("author");
    for slug in ["c", "a", "b"] {
        storage.create_note(&author, new_note(slug, slug, slug)).await.unwrap();
    }
    storage.create_note(&username("reader"), new_note("r", "r", "r")).await.unwrap();

    let slugs: Vec<_> = storage.list_notes(&author)
        .await.unwrap()
        .into_iter()
        .map(|note| note.slug.to_string())
        .collect();
    assert_eq!(slugs, ["c", "a", "b"]);
}

#[tokio::test]
async fn update_note_changes_only_given_fields() {
    let (storage, io) = make_storage_with_note().await;
    let updated = storage
        .update_note(
            &username("author"),
            "text",
            NoteUpdate {
                text: Some("New text".into()),
                ..Default::default()
            },
        )
        .await.expect("update failed");
    assert_eq!(updated.text, "New text");
    assert_eq!(updated.title, "Title");
    assert_eq!(&*updated.slug, "text");
    assert_eq!(io.write_count(), 2);

    let stored = storage.get_note(&username("author"), "text")
        .await.unwrap().unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn update_note_renames_slug_in_place() {
    let (storage, _) = make_storage().await;
    let author = username("author");
    for slug in ["first", "second", "third"] {
        storage.create_note(&author, new_note(slug, slug, slug)).await.unwrap();
    }
    storage
        .update_note(
            &author,
            "second",
            NoteUpdate {
                slug: Some(SlugString::from_str("renamed").unwrap()),
                ..Default::default()
            },
        )
        .await.expect("update failed");

    assert_eq!(storage.get_note(&author, "second").await.unwrap(), None);
    let slugs: Vec<_> = storage.list_notes(&author)
        .await.unwrap()
        .into_iter()
        .map(|note| note.slug.to_string())
        .collect();
    assert_eq!(slugs, ["first", "renamed", "third"]);
}

#[tokio::test]
async fn update_note_slug_taken() {
    let (storage, _) = make_storage_with_note().await;
    storage.create_note(&username("reader"), new_note("R", "R", "reader-note"))
        .await.unwrap();
    let err = storage
        .update_note(
            &username("author"),
            "text",
            NoteUpdate {
                slug: Some(SlugString::from_str("reader-note").unwrap()),
                ..Default::default()
            },
        )
        .await.expect_err("should fail");
    assert!(matches!(err, StorageError::SlugTaken(_)), "wrong error type: {err:#?}");
}

#[tokio::test]
async fn update_note_keeping_own_slug() {
    let (storage, _) = make_storage_with_note().await;
    let updated = storage
        .update_note(
            &username("author"),
            "text",
            NoteUpdate {
                title: Some("New title".into()),
                slug: Some(SlugString::from_str("text").unwrap()),
                ..Default::default()
            },
        )
        .await.expect("update failed");
    assert_eq!(updated.title, "New title");
}

#[tokio::test]
async fn update_note_by_reader_is_not_found() {
    let (storage, io) = make_storage_with_note().await;
    let err = storage
        .update_note(
            &username("reader"),
            "text",
            NoteUpdate {
                text: Some("hijacked".into()),
                ..Default::default()
            },
        )
        .await.expect_err("should fail");
    assert!(matches!(err, StorageError::NoteNotFound), "wrong error type: {err:#?}");
    assert_eq!(io.write_count(), 1);
    let note = storage.get_note(&username("author"), "text").await.unwrap().unwrap();
    assert_eq!(note.text, "Text");
}

#[tokio::test]
async fn delete_note() {
    let (storage, io) = make_storage_with_note().await;
    storage.delete_note(&username("author"), "text")
        .await.expect("delete failed");
    assert_eq!(storage.count_notes().await, 0);
    assert_eq!(io.stored().unwrap().notes, Vec::new());
}

#[tokio::test]
async fn delete_note_by_reader_is_not_found() {
    let (storage, _) = make_storage_with_note().await;
    let err = storage.delete_note(&username("reader"), "text")
        .await.expect_err("should fail");
    assert!(matches!(err, StorageError::NoteNotFound), "wrong error type: {err:#?}");
    assert_eq!(storage.count_notes().await, 1);
}

#[tokio::test]
async fn state_survives_reload() {
    let (storage, io) = make_storage_with_note().await;
    storage.create_note(&username("author"), new_note("Second", "Two", "second"))
        .await.unwrap();
    drop(storage);

    let reloaded = NoteStorageImpl::load(io.clone()).await.unwrap();
    let slugs: Vec<_> = reloaded.list_notes(&username("author"))
        .await.unwrap()
        .into_iter()
        .map(|note| note.slug.to_string())
        .collect();
    assert_eq!(slugs, ["text", "second"]);
}

#[tokio::test]
async fn load_rejects_duplicate_slugs() {
    let stored_note = |author: &str, title: &str| NoteData {
        id: make_uuid(&mut rand::rng()),
        slug: SlugString::from_str("same").unwrap(),
        author: username(author),
        title: title.into(),
        text: "Text".into(),
        created_at: OffsetDateTime::now_utc(),
    };
    let io = MemoryStateFile::new(
        Some(
            NotesData {
                notes: vec![
                    stored_note("author", "First"),
                    stored_note("reader", "Second"),
                ],
            }
        )
    );
    let result = NoteStorageImpl::load(io).await;
    assert!(
        matches!(
            result,
            Err(StorageError::StateFile(StateFileError::Inconsistent(_))),
        ),
        "duplicate slugs were accepted",
    );
}
