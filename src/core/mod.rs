//! core
//!
//! Domain types, normalization, reconciliation and the repository.
//!
//! # Modules
//!
//! - [`types`] - Strong types: HeroName, Tier, Lane, Role, etc.
//! - [`model`] - Canonical record shapes
//! - [`normalize`] - Raw or legacy input to canonical records
//! - [`reconcile`] - Relationship symmetry and referential integrity
//! - [`repository`] - In-memory dataset with load/persist
//! - [`query`] - Search, filtering and tier rankings
//! - [`snapshot`] - Self-describing snapshot layout
//! - [`config`] - Configuration schema and loading
//! - [`lock`] - Data-file locking
//! - [`atomic`] - Temp-file-and-rename writes
//!
//! # Design Principles
//!
//! - Strong typing keeps invalid names and labels out of the dataset
//! - Normalization is total: any input yields a well-shaped record
//! - Reconciliation is deterministic and idempotent

pub mod atomic;
pub mod config;
pub mod lock;
pub mod model;
pub mod normalize;
pub mod query;
pub mod reconcile;
pub mod repository;
pub mod snapshot;
pub mod types;
