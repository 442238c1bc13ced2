//! Storage error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the file-backed snapshot store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing or removing the snapshot file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot was not valid JSON.
    #[error("snapshot is not valid JSON: {0}")]
    Encode(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
