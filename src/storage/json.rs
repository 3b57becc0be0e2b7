//! JSON file-based storage backend.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a temporary sibling file
//! first and are then renamed over the target, so a crash mid-write leaves the
//! previous blob intact.
//!
//! # File Layout
//!
//! ```text
//! <data_dir>/
//! ├── todos.json          # the collection blob
//! ├── todos.json.tmp      # only present during a write
//! └── ztodo-otlp.json     # trace export, not managed here
//! ```
//!
//! Inside the Zellij sandbox the data directory lives under `/host`, which needs
//! the `FullHdAccess` permission.
//!
//! # Error Mapping
//!
//! | Failure | Error |
//! |---|---|
//! | directory cannot be created | [`TodoError::Io`] |
//! | file exists but cannot be read | [`TodoError::PersistenceRead`] |
//! | temp write or rename fails | [`TodoError::PersistenceWrite`] |
//!
//! A missing file is not an error: it reads as `None`.

use crate::domain::error::{Result, TodoError};
use crate::storage::backend::Storage;
use std::io::ErrorKind;
use std::path::PathBuf;

/// File-per-key storage backend.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. It is owned by the storage worker, which
/// processes one request at a time.
///
/// # Examples
///
/// ```no_run
/// use ztodo::storage::{JsonFileStorage, Storage};
/// use std::path::PathBuf;
///
/// let storage = JsonFileStorage::new(PathBuf::from("/tmp/ztodo"))?;
/// let blob = storage.get("todos")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Opens storage rooted at `dir`, creating the directory if needed.
    ///
    /// # Parameters
    ///
    /// * `dir` - Data directory, already resolved (no `~`)
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Io`] if the directory cannot be created, for
    /// example when a path component is a regular file or the sandbox lacks
    /// filesystem permission.
    pub fn new(dir: PathBuf) -> Result<Self> {
        tracing::debug!(dir = ?dir, "initializing JSON file storage");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Path of the file holding `key`: `<dir>/<key>.json`.
    ///
    /// Keys are fixed identifiers chosen by the repository, never user input,
    /// so no escaping is applied.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for JsonFileStorage {
    /// Reads the whole file for `key`. A missing file is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        let _span = tracing::debug_span!("json_get", path = ?path).entered();

        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(bytes = contents.len(), "blob read");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no blob stored yet");
                Ok(None)
            }
            Err(e) => Err(TodoError::PersistenceRead(format!("{}: {e}", path.display()))),
        }
    }

    /// Replaces the file for `key` via a `.tmp` sibling and a rename.
    ///
    /// The rename is atomic on the same filesystem, so readers see either the
    /// old blob or the new one, never a partial write.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let _span = tracing::debug_span!("json_set", path = ?path, bytes = value.len()).entered();

        let tmp_path = path.with_extension("json.tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, value)
            .map_err(|e| TodoError::PersistenceWrite(format!("{}: {e}", tmp_path.display())))?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &path)
            .map_err(|e| TodoError::PersistenceWrite(format!("{}: {e}", path.display())))?;

        tracing::debug!("blob saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = TempDir::new().expect("tempdir");
        let storage = JsonFileStorage::new(dir.path().to_path_buf()).expect("storage");
        assert!(storage.get("todos").expect("read").is_none());
    }

    #[test]
    fn set_then_get_returns_blob() {
        let dir = TempDir::new().expect("tempdir");
        let mut storage = JsonFileStorage::new(dir.path().to_path_buf()).expect("storage");
        storage.set("todos", "[1]").expect("write");
        storage.set("todos", "[2]").expect("overwrite");
        assert_eq!(storage.get("todos").expect("read").as_deref(), Some("[2]"));
        assert!(!dir.path().join("todos.json.tmp").exists());
    }

    #[test]
    fn creates_missing_directory() {
        let dir = TempDir::new().expect("tempdir");
        let nested = dir.path().join("a").join("b");
        let mut storage = JsonFileStorage::new(nested.clone()).expect("storage");
        storage.set("todos", "[]").expect("write");
        assert!(nested.join("todos.json").exists());
    }

    #[test]
    fn unwritable_target_reports_write_error() {
        let dir = TempDir::new().expect("tempdir");
        let mut storage = JsonFileStorage::new(dir.path().to_path_buf()).expect("storage");
        // a directory where the file should go makes the rename fail
        std::fs::create_dir(storage.path_for("todos")).expect("mkdir");
        let err = storage.set("todos", "[]").unwrap_err();
        assert!(matches!(err, TodoError::PersistenceWrite(_)));
    }
}
