//! store::traits
//!
//! Snapshot store trait definition.
//!
//! # Design
//!
//! The `SnapshotStore` trait is the whole persistence contract: read the
//! previous snapshot, or write a new one in full. There are no partial
//! updates. Implementations deal in raw JSON values; shaping them is the
//! normalizer's job.
//!
//! # Atomicity
//!
//! Implementations MUST:
//! - Leave the previous snapshot readable if `write_all` fails
//! - Report "nothing stored yet" as `Ok(None)`, not as an error

use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from snapshot storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read snapshot '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse snapshot '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write snapshot '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode snapshot: {0}")]
    EncodeError(String),

    /// The stored snapshot changed since it was read.
    #[error("snapshot '{path}' was modified by someone else since it was loaded")]
    Conflict { path: PathBuf },

    /// Injected failure, used by the in-memory store.
    #[error("snapshot store unavailable: {0}")]
    Unavailable(String),
}

/// Whole-snapshot persistence.
///
/// # Example
///
/// ```
/// use herodex::store::{MemoryStore, SnapshotStore};
/// use serde_json::json;
///
/// let mut store = MemoryStore::new();
/// assert!(store.read_all().unwrap().is_none());
///
/// store.write_all(&json!({"heroes": {}})).unwrap();
/// assert!(store.read_all().unwrap().is_some());
/// ```
pub trait SnapshotStore {
    /// Read the stored snapshot, or `None` on first run.
    fn read_all(&mut self) -> Result<Option<Value>, StoreError>;

    /// Replace the stored snapshot.
    fn write_all(&mut self, snapshot: &Value) -> Result<(), StoreError>;

    /// Human-readable location, used in messages.
    fn location(&self) -> String;
}
