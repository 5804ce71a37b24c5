//! store
//!
//! Persistence adapters for dataset snapshots.
//!
//! # Architecture
//!
//! Snapshots are read and written through the `SnapshotStore` trait, which
//! has two implementations:
//!
//! - [`JsonFileStore`]: one pretty-printed JSON file, atomic writes,
//!   change detection between read and write (default)
//! - [`MemoryStore`]: keeps the snapshot in memory, with failure injection
//!
//! The [`Repository`](crate::core::repository::Repository) depends only on
//! the trait.

mod file_store;
mod memory;
mod traits;

pub use file_store::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::{SnapshotStore, StoreError};
