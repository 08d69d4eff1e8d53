//! Persistence error types.

use std::path::PathBuf;

/// Errors that can occur when reading or writing the key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem operation failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be encoded for storage
    #[error("failed to serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Key cannot be mapped to a storage location
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
