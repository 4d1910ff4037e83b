use assert_fs::prelude::*;
use assert_fs::TempDir;
use serde::Deserialize;
use super::*;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct Records {
    #[serde(rename = "record")]
    records: Vec<Record>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct Record {
    name: String,
    text: String,
}

fn records() -> Records {
    Records {
        records: vec![
            Record { name: "first".into(), text: "multi\nline".into() },
            Record { name: "второй".into(), text: String::new() },
        ],
    }
}

#[tokio::test]
async fn missing_data_dir_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = TomlStateFile::new(&dir.path().join("absent"), "state.toml")
        .await
        .expect_err("should fail");
    assert!(matches!(err, StateFileError::DataDirNotInitialized), "wrong error type: {err:#?}");
}

#[tokio::test]
async fn data_dir_that_is_a_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let file = dir.child("file");
    file.touch().unwrap();
    let err = TomlStateFile::new(file.path(), "state.toml")
        .await
        .expect_err("should fail");
    assert!(matches!(err, StateFileError::DataDirNotInitialized), "wrong error type: {err:#?}");
}

#[tokio::test]
async fn missing_file_reads_as_none() {
    let dir = TempDir::new().unwrap();
    let file = TomlStateFile::new(dir.path(), "state.toml").await.unwrap();
    let state: Option<Records> = file.read_state().await.unwrap();
    assert_eq!(state, None);
}

#[tokio::test]
async fn written_state_reads_back() {
    let dir = TempDir::new().unwrap();
    let file = TomlStateFile::new(dir.path(), "state.toml").await.unwrap();
    file.write_state(&records()).await.unwrap();

    let reopened = TomlStateFile::new(dir.path(), "state.toml").await.unwrap();
    let state: Option<Records> = reopened.read_state().await.unwrap();
    assert_eq!(state, Some(records()));
}

#[tokio::test]
async fn no_tmp_files_are_left_behind() {
    let dir = TempDir::new().unwrap();
    let file = TomlStateFile::new(dir.path(), "state.toml").await.unwrap();
    file.write_state(&records()).await.unwrap();
    file.write_state(&Records { records: Vec::new() }).await.unwrap();

    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("state.toml")]);
}

#[tokio::test]
async fn invalid_contents_are_reported() {
    let dir = TempDir::new().unwrap();
    dir.child("state.toml").write_str("record = 12").unwrap();
    let file = TomlStateFile::new(dir.path(), "state.toml").await.unwrap();
    let err = StateFileIo::<Records>::read_state(&file)
        .await
        .expect_err("should fail");
    assert!(matches!(err, StateFileError::Parsing(_)), "wrong error type: {err:#?}");
}
