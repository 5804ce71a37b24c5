//! store::memory
//!
//! In-memory snapshot store for tests and embedding.
//!
//! Supports failure injection so callers can exercise the persistence
//! error paths without touching the filesystem.

use serde_json::Value;

use super::traits::{SnapshotStore, StoreError};

/// Snapshot store that keeps the last written value in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    snapshot: Option<Value>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStore {
    /// Create an empty store (reads as "nothing yet").
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `snapshot`.
    pub fn with_snapshot(snapshot: Value) -> Self {
        Self {
            snapshot: Some(snapshot),
            ..Self::default()
        }
    }

    /// Make subsequent reads fail.
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make subsequent writes fail.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// The currently stored snapshot.
    pub fn snapshot(&self) -> Option<&Value> {
        self.snapshot.as_ref()
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SnapshotStore for MemoryStore {
    fn read_all(&mut self) -> Result<Option<Value>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable("injected read failure".into()));
        }
        Ok(self.snapshot.clone())
    }

    fn write_all(&mut self, snapshot: &Value) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("injected write failure".into()));
        }
        self.snapshot = Some(snapshot.clone());
        self.writes += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
