//! store::file_store
//!
//! JSON file snapshot storage.
//!
//! # Guarantees
//!
//! - Writes are atomic (temp file + sync + rename), see [`crate::core::atomic`]
//! - Output is pretty-printed UTF-8 JSON, non-ASCII kept as-is
//! - Optimistic versioning: the store remembers a fingerprint of what it
//!   last read or wrote, and refuses to overwrite a file that changed on
//!   disk in between ([`StoreError::Conflict`])

use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::traits::{SnapshotStore, StoreError};
use crate::core::atomic::write_atomic;
use crate::core::types::Fingerprint;

/// What the store believes is currently on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Expected {
    /// Nothing read or written yet; writes are unchecked.
    Unknown,
    /// The file did not exist.
    Absent,
    /// The file had these contents.
    Present(Fingerprint),
}

/// File-backed snapshot store.
///
/// # Example
///
/// ```no_run
/// use herodex::store::{JsonFileStore, SnapshotStore};
///
/// let mut store = JsonFileStore::new("/home/me/.herodex/heroes.json");
/// let snapshot = store.read_all().unwrap();
/// ```
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    expected: Expected,
}

impl JsonFileStore {
    /// Create a store for the given data file. Nothing is touched yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            expected: Expected::Unknown,
        }
    }

    /// Get the path to the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fingerprint of the file contents last read or written, if any.
    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        match &self.expected {
            Expected::Present(fp) => Some(fp),
            _ => None,
        }
    }

    /// Current on-disk state.
    fn observe(&self) -> Result<Expected, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Expected::Present(Fingerprint::of_bytes(&bytes))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Expected::Absent),
            Err(e) => Err(StoreError::ReadError {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

impl SnapshotStore for JsonFileStore {
    fn read_all(&mut self) -> Result<Option<Value>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no snapshot at {}", self.path.display());
                self.expected = Expected::Absent;
                return Ok(None);
            }
            Err(e) => {
                return Err(StoreError::ReadError {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let value: Value =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::ParseError {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        self.expected = Expected::Present(Fingerprint::of_bytes(&bytes));
        log::debug!("read {} bytes from {}", bytes.len(), self.path.display());
        Ok(Some(value))
    }

    fn write_all(&mut self, snapshot: &Value) -> Result<(), StoreError> {
        if self.expected != Expected::Unknown && self.observe()? != self.expected {
            return Err(StoreError::Conflict {
                path: self.path.clone(),
            });
        }

        let mut contents = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| StoreError::EncodeError(e.to_string()))?;
        contents.push(b'\n');

        write_atomic(&self.path, &contents).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;

        self.expected = Expected::Present(Fingerprint::of_bytes(&contents));
        log::debug!("wrote {} bytes to {}", contents.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> JsonFileStore {
        JsonFileStore::new(temp.path().join("heroes.json"))
    }

    #[test]
    fn missing_file_reads_as_none() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        assert!(store.read_all().unwrap().is_none());
    }

    #[test]
    fn write_then_read() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        let snapshot = json!({"heroes": {"蘇": {"tier": "T1"}}});

        store.write_all(&snapshot).unwrap();

        let mut reopened = store_in(&temp);
        assert_eq!(reopened.read_all().unwrap(), Some(snapshot));
    }

    #[test]
    fn non_ascii_written_verbatim() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        store.write_all(&json!({"heroes": {"蘇": {}}})).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("蘇"));
    }

    #[test]
    fn corrupt_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        fs::write(store.path(), "{not json").unwrap();

        let err = store.read_all().unwrap_err();
        assert!(matches!(err, StoreError::ParseError { .. }));
    }

    #[test]
    fn concurrent_modification_detected() {
        let temp = TempDir::new().unwrap();
        let mut first = store_in(&temp);
        first.write_all(&json!({"heroes": {}})).unwrap();

        let mut a = store_in(&temp);
        let mut b = store_in(&temp);
        a.read_all().unwrap();
        b.read_all().unwrap();

        a.write_all(&json!({"heroes": {"A": {}}})).unwrap();
        let err = b.write_all(&json!({"heroes": {"B": {}}})).unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));

        // The winning write is still on disk.
        let mut check = store_in(&temp);
        let value = check.read_all().unwrap().unwrap();
        assert!(value["heroes"].get("A").is_some());
    }

    #[test]
    fn file_created_after_absent_read_is_conflict() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        assert!(store.read_all().unwrap().is_none());

        fs::write(store.path(), "{}").unwrap();

        let err = store.write_all(&json!({})).unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[test]
    fn consecutive_writes_by_same_store_allowed() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        store.read_all().unwrap();
        store.write_all(&json!({"n": 1})).unwrap();
        store.write_all(&json!({"n": 2})).unwrap();
        assert!(store.fingerprint().is_some());
    }

    #[test]
    fn failed_write_keeps_previous_snapshot() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        store.write_all(&json!({"n": 1})).unwrap();

        // Block the temp file path with a directory so the write fails.
        let blocker = crate::core::atomic::temp_path_for(store.path());
        fs::create_dir(&blocker).unwrap();

        assert!(matches!(
            store.write_all(&json!({"n": 2})),
            Err(StoreError::WriteError { .. })
        ));
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\"n\": 1"));
    }
}
