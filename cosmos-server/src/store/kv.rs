//! Key-value stores holding serialized collections.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::error::StoreError;

/// Opaque text store addressed by key.
///
/// Values are whole JSON documents; callers read, modify, and write back.
pub trait KeyValueStore: Send + Sync {
    /// Read the value for `key`, `None` if it was never set.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value for `key`.
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
}

/// In-memory store, lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store keeping one JSON file per key in a directory.
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a key.
    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
            && !key.starts_with('.');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let path = self.path_for(key)?;

        if !self.dir.as_os_str().is_empty() && !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;
        }

        // Write then rename so a crash never leaves a half-written file
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|e| StoreError::io(&tmp, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| StoreError::io(&path, e))?;

        Ok(())
    }
}
