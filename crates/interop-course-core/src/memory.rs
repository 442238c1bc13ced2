//! In-memory snapshot store.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use crate::traits::SnapshotStore;

/// A snapshot store that keeps the serialized state in memory.
///
/// Useful for hosts without durable storage and for exercising the engine
/// without touching the filesystem. Writes can be made to fail on demand.
#[derive(Default)]
pub struct MemoryStore {
    snapshot: Mutex<Option<String>>,
    save_count: AtomicU32,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a snapshot.
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot.into())),
            ..Self::default()
        }
    }

    /// The currently stored snapshot.
    pub fn snapshot(&self) -> Option<String> {
        self.snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> u32 {
        self.save_count.load(Ordering::Relaxed)
    }

    /// Make every following save fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }
}

impl SnapshotStore for MemoryStore {
    fn load_snapshot(&self) -> anyhow::Result<Option<String>> {
        Ok(self.snapshot())
    }

    fn save_snapshot(&self, snapshot: &str) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::Relaxed) {
            anyhow::bail!("memory store is read-only");
        }
        *self
            .snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(snapshot.to_string());
        self.save_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
