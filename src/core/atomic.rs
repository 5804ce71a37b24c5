//! core::atomic
//!
//! Crash-safe whole-file replacement.
//!
//! The new contents are written to a sibling temp file, synced, then
//! renamed over the target. Until the rename the previous file stays
//! intact, so a crash never leaves a half-written target behind.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Path of the temp file used while replacing `path`.
///
/// Lives in the same directory so the rename stays on one filesystem.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("snapshot"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Atomically replace `path` with `contents`.
///
/// Creates parent directories if needed. On error the temp file is
/// removed (best effort) and `path` is untouched.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_path_for(path);
    let result = (|| {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}
