// SPDX-License-Identifier: MPL-2.0
//! Filesystem-backed key-value store.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a temporary sibling
//! first and are renamed into place, so a crash mid-write leaves the previous
//! value intact.

use crate::app::paths;
use crate::application::port::KeyValueStore;
use crate::error::StorageError;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// Stores each value in its own file under a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Uses `dir` as the storage root. The directory is created on first
    /// write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Uses the resolved application data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        Self::open_with_override(None)
    }

    /// Uses `base_dir`, falling back to the resolved data directory.
    pub fn open_with_override(base_dir: Option<PathBuf>) -> Result<Self, StorageError> {
        paths::get_app_data_dir_with_override(base_dir)
            .map(Self::new)
            .ok_or_else(|| {
                StorageError::Unavailable("no data directory could be determined".to_string())
            })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }

    fn write_atomically(&self, path: &Path, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let temp = path.with_extension(format!("{EXTENSION}.tmp"));
        let result = (|| {
            let mut file = fs::File::create(&temp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&temp, path)
        })();
        if result.is_err() {
            let _ = fs::remove_file(&temp);
        }
        result
    }
}

/// Keys become file names, so only a conservative alphabet is allowed.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key.len() <= 128
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        && !key.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(StorageError::Unavailable(format!("invalid storage key '{key}'")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::from_io(key, &err, false)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        self.write_atomically(&path, value)
            .map_err(|err| StorageError::from_io(key, &err, true))?;
        tracing::debug!(key, path = %path.display(), bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::from_io(key, &err, true)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn set_get_remove_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let store = FileStore::new(temp_dir.path().join("boards"));

        assert_eq!(store.get("moodboard-state").expect("get"), None);
        store.set("moodboard-state", "{\"a\":1}").expect("set");
        assert_eq!(
            store.get("moodboard-state").expect("get").as_deref(),
            Some("{\"a\":1}")
        );
        store.remove("moodboard-state").expect("remove");
        assert_eq!(store.get("moodboard-state").expect("get"), None);
        store.remove("moodboard-state").expect("removing twice is fine");
    }

    #[test]
    fn overwrite_leaves_no_temp_files() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let store = FileStore::new(temp_dir.path());
        store.set("k", "one").expect("set");
        store.set("k", "two").expect("set");

        let names: Vec<String> = fs::read_dir(temp_dir.path())
            .expect("read dir")
            .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["k.json".to_string()]);
        assert_eq!(store.get("k").expect("get").as_deref(), Some("two"));
    }

    #[test]
    fn path_like_keys_are_rejected() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let store = FileStore::new(temp_dir.path());
        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(
                matches!(store.set(key, "x"), Err(StorageError::Unavailable(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn override_directory_is_used() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let store =
            FileStore::open_with_override(Some(temp_dir.path().to_path_buf())).expect("open");
        assert_eq!(store.dir(), temp_dir.path());
    }
}
