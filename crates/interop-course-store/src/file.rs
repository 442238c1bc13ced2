//! JSON file snapshot store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use interop_course_core::traits::SnapshotStore;

use crate::error::StoreError;

/// Keeps the learner snapshot in a single JSON file.
///
/// The file is replaced on every save by writing a sibling temporary file
/// and renaming it over the old one, so a crash mid-write leaves the last
/// good snapshot in place.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the snapshot. A missing file is `Ok(None)`.
    pub fn read(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    /// Replace the snapshot, creating the parent directory if needed.
    pub fn write(&self, snapshot: &str) -> Result<(), StoreError> {
        serde_json::from_str::<serde_json::Value>(snapshot)
            .map_err(|e| StoreError::Encode(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, snapshot).map_err(|e| StoreError::io(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }

    /// Delete the snapshot. Returns `false` if there was nothing to delete.
    pub fn clear(&self) -> Result<bool, StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "cleared saved progress");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }
}

impl SnapshotStore for JsonFileStore {
    fn load_snapshot(&self) -> anyhow::Result<Option<String>> {
        Ok(self.read()?)
    }

    fn save_snapshot(&self, snapshot: &str) -> anyhow::Result<()> {
        self.write(snapshot)?;
        tracing::debug!(path = %self.path.display(), "snapshot written");
        Ok(())
    }
}
