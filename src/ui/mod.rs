//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All output goes through this module so `--quiet` is honoured in one
//! place.

pub mod output;
