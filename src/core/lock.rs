//! core::lock
//!
//! Exclusive lock on a data file for the duration of one edit.
//!
//! # Architecture
//!
//! Every mutating command holds the lock across load → mutate → reconcile
//! → persist, so two `hdx` processes never interleave writes to the same
//! data file. Read-only commands do not take it.
//!
//! # Storage
//!
//! - `<data_file>.lock`, next to the data file, with an OS-level exclusive
//!   lock on it
//!
//! # Invariants
//!
//! - Acquisition is non-blocking: a held lock fails fast
//! - The lock is released on drop
//!
//! # Example
//!
//! ```no_run
//! use herodex::core::lock::DataLock;
//! use std::path::Path;
//!
//! let lock = DataLock::acquire(Path::new("/home/me/.herodex/heroes.json")).unwrap();
//! assert!(lock.is_held());
//! // ... load, edit, persist ...
//! drop(lock);
//! ```

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

/// Errors from locking operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process already holds the lock.
    #[error("data file is locked by another herodex process ({0})")]
    AlreadyLocked(PathBuf),

    /// Failed to create the lock file or its directory.
    #[error("failed to create lock: {0}")]
    CreateFailed(String),

    /// Failed to take the OS lock.
    #[error("failed to acquire lock: {0}")]
    AcquireFailed(String),

    #[error("failed to release lock: {0}")]
    ReleaseFailed(String),
}

/// Path of the lock file guarding `data_file`.
pub fn lock_path_for(data_file: &Path) -> PathBuf {
    let mut name = data_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    data_file.with_file_name(name)
}

/// RAII guard for the data-file lock.
#[derive(Debug)]
pub struct DataLock {
    path: PathBuf,
    /// Some while the lock is held.
    file: Option<File>,
}

impl DataLock {
    /// Take the lock guarding `data_file`.
    ///
    /// Creates the data file's directory if needed.
    ///
    /// # Errors
    ///
    /// - [`LockError::AlreadyLocked`] if another process holds it
    /// - [`LockError::CreateFailed`] if the lock file cannot be created
    /// - [`LockError::AcquireFailed`] if the OS lock fails otherwise
    pub fn acquire(data_file: &Path) -> Result<Self, LockError> {
        if let Some(dir) = data_file.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| {
                LockError::CreateFailed(format!("cannot create {}: {}", dir.display(), e))
            })?;
        }

        let path = lock_path_for(data_file);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| {
                LockError::CreateFailed(format!("cannot open {}: {}", path.display(), e))
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                log::debug!("acquired {}", path.display());
                Ok(Self {
                    path,
                    file: Some(file),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                Err(LockError::AlreadyLocked(path))
            }
            Err(e) => Err(LockError::AcquireFailed(e.to_string())),
        }
    }

    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release early. Safe to call more than once.
    pub fn release(&mut self) -> Result<(), LockError> {
        if let Some(file) = self.file.take() {
            FileExt::unlock(&file).map_err(|e| LockError::ReleaseFailed(e.to_string()))?;
        }
        Ok(())
    }
}

impl Drop for DataLock {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = FileExt::unlock(&file);
        }
    }
}
