//! JSON arrays stored under one key, decoded entry by entry.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::error::StoreError;
use super::kv::KeyValueStore;

/// Result of loading a stored collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    /// Entries that decoded, in stored order.
    pub items: Vec<T>,

    /// Entries skipped because they could not be decoded.
    pub skipped: usize,

    /// True if the stored value was not a JSON array and was treated as empty.
    pub corrupted: bool,
}

impl<T> Loaded<T> {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            skipped: 0,
            corrupted: false,
        }
    }

    /// Returns true if nothing was skipped or discarded.
    pub fn is_clean(&self) -> bool {
        self.skipped == 0 && !self.corrupted
    }
}

/// Load the array stored under `key`.
///
/// A missing key is an empty collection. A value that is not a JSON array
/// is treated as empty, and entries that fail to decode are skipped; both
/// are logged and reported rather than returned as errors.
pub(crate) fn load_entries<T, S>(store: &S, key: &str) -> Result<Loaded<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(text) = store.get(key)? else {
        return Ok(Loaded::empty());
    };

    let raw: Vec<serde_json::Value> = match serde_json::from_str(&text) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(key, error = %e, "Stored value is not a JSON array, treating as empty");
            return Ok(Loaded {
                corrupted: true,
                ..Loaded::empty()
            });
        }
    };

    let mut loaded = Loaded::empty();
    for (index, value) in raw.into_iter().enumerate() {
        match serde_json::from_value(value) {
            Ok(item) => loaded.items.push(item),
            Err(e) => {
                warn!(key, index, error = %e, "Skipping undecodable stored entry");
                loaded.skipped += 1;
            }
        }
    }

    Ok(loaded)
}

/// Replace the array stored under `key`.
pub(crate) fn save_entries<T, S>(store: &S, key: &str, items: &[T]) -> Result<(), StoreError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let text = serde_json::to_string(items).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, text)
}
