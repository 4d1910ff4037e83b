//! Whole-state persistence for the stores: every store keeps its records in
//! memory and rewrites one TOML file in the data directory after each
//! mutation.

mod errors;
#[cfg(test)] pub(crate) mod testing;
#[cfg(test)] mod tests;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use log::{debug, error, trace};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use crate::lib_constants::TMP_FILENAME_INFIX;
use crate::rng::make_uuid;

pub use errors::StateFileError;

#[async_trait]
pub trait StateFileIo<T: Send + Sync>: Send + Sync {
    /// `None` if nothing has been written yet.
    async fn read_state(&self) -> Result<Option<T>, StateFileError>;

    async fn write_state(&self, data: &T) -> Result<(), StateFileError>;
}

#[derive(Debug)]
pub struct TomlStateFile {
    path: PathBuf,
}

impl TomlStateFile {
    pub async fn new(
        data_directory: &Path,
        file_name: &str,
    ) -> Result<Self, StateFileError> {
        debug!(
            "opening state file \"{file_name}\" in {}",
            data_directory.display(),
        );
        match fs::metadata(data_directory).await {
            Ok(meta) if meta.is_dir() => {},
            Ok(_) => return Err(StateFileError::DataDirNotInitialized),
            Err(e) if e.kind() == ErrorKind::NotFound =>
                return Err(StateFileError::DataDirNotInitialized),
            Err(e) => return Err(e.into()),
        }
        Ok(TomlStateFile { path: data_directory.join(file_name) })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut file_name = self.path
            .file_name()
            .unwrap_or_default()
            .to_owned();
        file_name.push(TMP_FILENAME_INFIX);
        file_name.push(make_uuid(&mut rand::rng()).hyphenated().to_string());
        self.path.with_file_name(file_name)
    }
}

#[async_trait]
impl<T> StateFileIo<T> for TomlStateFile
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn read_state(&self) -> Result<Option<T>, StateFileError> {
        trace!("reading state file \"{}\"", self.path.display());
        match fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(toml::from_str(&contents)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(
                    "state file \"{}\" does not exist yet, starting empty",
                    self.path.display(),
                );
                Ok(None)
            },
            Err(e) => Err(e.into()),
        }
    }

    async fn write_state(&self, data: &T) -> Result<(), StateFileError> {
        let serialized = toml::to_string(data)?;
        let tmp_path = self.tmp_path();
        trace!(
            "writing state file \"{}\" through \"{}\"",
            self.path.display(),
            tmp_path.display(),
        );
        fs::write(&tmp_path, serialized).await?;
        if let Err(e) = fs::rename(&tmp_path, &self.path).await {
            error!(
                "failed to rename tmp file \"{}\" to \"{}\": {e}",
                tmp_path.display(),
                self.path.display(),
            );
            if let Err(e) = fs::remove_file(&tmp_path).await {
                error!(
                    "failed to remove tmp file \"{}\": {e}",
                    tmp_path.display(),
                );
            }
            return Err(e.into())
        }
        Ok(())
    }
}
