//! JSON file store keyed by name
//!
//! Provides a `KeyValueStore` that writes serializable values to `<key>.json`
//! files together with the time they were last written.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading or writing the store
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem access failed
    #[error("Storage I/O failed: {0}")]
    Io(#[from] io::Error),

    /// A stored document could not be encoded or decoded
    #[error("Stored data is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    /// No config directory could be determined for this user
    #[error("Could not determine a config directory")]
    NoConfigDir,
}

/// On-disk wrapper around a stored value
#[derive(Debug, Serialize, Deserialize)]
struct StoreEntry<T> {
    value: T,
    updated_at: DateTime<Utc>,
}

/// A value read back from the store
#[derive(Debug)]
pub struct StoredValue<T> {
    pub value: T,
    /// When the value was last written
    pub updated_at: DateTime<Utc>,
}

/// Reads and writes JSON documents under a single directory
///
/// The default location is `~/.config/skyview/` on Linux, or the equivalent
/// platform config path elsewhere.
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    dir: PathBuf,
}

impl KeyValueStore {
    /// Creates a store in the platform config directory
    pub fn new() -> Result<Self, StorageError> {
        let project_dirs = ProjectDirs::from("", "", "skyview").ok_or(StorageError::NoConfigDir)?;
        Ok(Self {
            dir: project_dirs.config_dir().to_path_buf(),
        })
    }

    /// Creates a store rooted at a custom directory
    ///
    /// Useful for tests or when the `--config-dir` flag is given.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Writes `value` under `key`, replacing any previous value
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        let entry = StoreEntry {
            value,
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&entry)?;
        fs::write(self.path(key), json)?;

        tracing::debug!(key, dir = %self.dir.display(), "store write");
        Ok(())
    }

    /// Reads the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(None)` if nothing has been stored under `key`
    /// * `Ok(Some(StoredValue))` if the value exists and parses
    /// * `Err` if the file cannot be read or holds invalid data
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<StoredValue<T>>, StorageError> {
        let content = match fs::read_to_string(self.path(key)) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let entry: StoreEntry<T> = serde_json::from_str(&content)?;

        Ok(Some(StoredValue {
            value: entry.value,
            updated_at: entry.updated_at,
        }))
    }

    /// Removes the value stored under `key`; removing a missing key is not an error
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    fn create_test_store() -> (KeyValueStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = KeyValueStore::with_dir(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[test]
    fn test_write_creates_json_file() {
        let (store, temp_dir) = create_test_store();
        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        store.write("test_key", &data).expect("Write should succeed");

        let expected_path = temp_dir.path().join("test_key.json");
        assert!(expected_path.exists(), "Store file should exist");

        let content = fs::read_to_string(&expected_path).expect("Should read file");
        assert!(content.contains("\"name\""));
        assert!(content.contains("\"updated_at\""));
        assert!(content.contains("42"));
    }

    #[test]
    fn test_read_missing_key_returns_none() {
        let (store, _temp_dir) = create_test_store();

        let result: Option<StoredValue<TestData>> =
            store.read("nonexistent_key").expect("Read should succeed");

        assert!(result.is_none());
    }

    #[test]
    fn test_read_returns_written_value() {
        let (store, _temp_dir) = create_test_store();
        let data = TestData {
            name: "stored".to_string(),
            value: 100,
        };

        let before = Utc::now();
        store.write("key", &data).expect("Write should succeed");

        let stored: StoredValue<TestData> = store
            .read("key")
            .expect("Read should succeed")
            .expect("Value should exist");

        assert_eq!(stored.value, data);
        assert!(stored.updated_at >= before);
    }

    #[test]
    fn test_read_corrupt_file_is_an_error() {
        let (store, temp_dir) = create_test_store();
        fs::write(temp_dir.path().join("broken.json"), "{ not json").unwrap();

        let result: Result<Option<StoredValue<TestData>>, _> = store.read("broken");

        assert!(matches!(result, Err(StorageError::Serde(_))));
    }

    #[test]
    fn test_write_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested_path = temp_dir.path().join("nested").join("config");
        let store = KeyValueStore::with_dir(nested_path.clone());

        store.write("nested_key", &1u8).expect("Write should succeed");

        assert!(nested_path.join("nested_key.json").exists());
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let (store, _temp_dir) = create_test_store();

        store.write("key", &"first").expect("First write should succeed");
        store.write("key", &"second").expect("Second write should succeed");

        let stored: StoredValue<String> = store.read("key").unwrap().unwrap();
        assert_eq!(stored.value, "second");
    }

    #[test]
    fn test_remove_deletes_and_tolerates_missing() {
        let (store, _temp_dir) = create_test_store();
        store.write("key", &1u8).unwrap();

        store.remove("key").expect("Remove should succeed");
        store.remove("key").expect("Second remove should also succeed");

        let result: Option<StoredValue<u8>> = store.read("key").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_new_uses_project_named_path() {
        if let Ok(store) = KeyValueStore::new() {
            let path_str = store.dir().to_string_lossy();
            assert!(path_str.contains("skyview"));
        }
        // Passes when no home directory is available (e.g. in CI)
    }
}
