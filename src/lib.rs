//! herodex - hero strategy data core for Arena of Valor
//!
//! herodex keeps a personal dataset of heroes (tiers, roles, lanes,
//! counters, synergies, ban targets), team compositions and ban lists,
//! and keeps the relationships between heroes consistent.
//!
//! # Architecture
//!
//! The codebase is layered:
//!
//! - [`cli`] - Command-line interface (`hdx`)
//! - [`core`] - Domain types, normalization, reconciliation, repository
//! - [`store`] - Snapshot persistence adapters
//! - [`logging`] - Process-wide logger bootstrap
//! - [`ui`] - User-facing output
//!
//! # Correctness Invariants
//!
//! After reconciliation:
//!
//! 1. `B ∈ A.counters` iff `A ∈ B.countered_by`
//! 2. Every relationship entry names an existing hero other than itself
//! 3. Every record is fully shaped, whatever the input looked like
//! 4. A failed save never damages the previous snapshot

pub mod cli;
pub mod core;
pub mod logging;
pub mod store;
pub mod ui;
