//! Key-value persistence for small UI preference records.
//!
//! Records are JSON values stored under fixed keys. [`JsonFileStorage`]
//! keeps all keys in one file and rewrites it atomically on each save;
//! [`MemoryStorage`] is for tests and ephemeral sessions.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;

use crate::error::StoreError;

/// File name used inside the platform data directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Storage backend for preference records.
pub trait PreferenceStorage: Send + Sync {
    /// The record stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Store `value` under `key`, replacing any previous record.
    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError>;

    /// Delete the record under `key`.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.data.lock().get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.data.lock().insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.data.lock().remove(key);
        Ok(())
    }
}

/// Storage backed by a single JSON object file.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    data: RwLock<BTreeMap<String, Value>>,
}

impl JsonFileStorage {
    /// Open the file at `path`. A missing file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| StoreError::Serialization {
                    key: path.display().to_string(),
                    source,
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        tracing::debug!(
            target: "tabula::store",
            path = %path.display(),
            keys = data.len(),
            "opened preference file"
        );
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Open [`PREFERENCES_FILE`] in the platform data directory.
    pub fn in_data_dir() -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from("com", "Tabula", "tabula").ok_or(StoreError::NoDataDir)?;
        Self::open(dirs.data_dir().join(PREFERENCES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, data: &BTreeMap<String, Value>) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(data).map_err(|source| StoreError::Serialization {
            key: self.path.display().to_string(),
            source,
        })?;

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;

        // Same directory as the target so the final rename stays on one filesystem.
        let mut temp =
            tempfile::NamedTempFile::new_in(parent).map_err(|e| StoreError::io(parent, e))?;
        temp.write_all(&json)
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| StoreError::io(temp.path(), e))?;
        temp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;
        Ok(())
    }
}

impl PreferenceStorage for JsonFileStorage {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.data.read().get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let mut data = self.data.write();
        data.insert(key.to_string(), value.clone());
        self.flush(&data)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut data = self.data.write();
        if data.remove(key).is_some() {
            self.flush(&data)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_file_round_trip_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(PREFERENCES_FILE);

        let storage = JsonFileStorage::open(&path).unwrap();
        assert_eq!(storage.load("ui-storage").unwrap(), None);
        storage.save("ui-storage", &json!({"a": 1})).unwrap();

        let reopened = JsonFileStorage::open(&path).unwrap();
        assert_eq!(reopened.load("ui-storage").unwrap(), Some(json!({"a": 1})));

        reopened.remove("ui-storage").unwrap();
        let reopened = JsonFileStorage::open(&path).unwrap();
        assert_eq!(reopened.load("ui-storage").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE);
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            JsonFileStorage::open(&path),
            Err(StoreError::Serialization { .. })
        ));
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        storage.save("k", &json!(true)).unwrap();
        assert_eq!(storage.load("k").unwrap(), Some(json!(true)));
        storage.remove("k").unwrap();
        assert_eq!(storage.load("k").unwrap(), None);
    }
}
