//! cli
//!
//! Command-line interface layer for herodex.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and start logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers open a [`commands::Session`] over the
//! data file, call [`Repository`](crate::core::repository::Repository)
//! operations, and print through [`crate::ui::output`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::{Context as _, Result};
use std::path::PathBuf;

use crate::core::config::Config;
use crate::logging;
use crate::ui::output::{self, Verbosity};

/// Execution context shared by all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// `--data` override.
    pub data: Option<PathBuf>,
    pub debug: bool,
    pub quiet: bool,
    pub config: Config,
}

impl Context {
    /// Output verbosity from the global flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// Data file to use: `--data`, else the configured one.
    pub fn data_file(&self) -> Result<PathBuf> {
        match &self.data {
            Some(path) => Ok(path.clone()),
            None => self
                .config
                .data_file()
                .context("cannot determine data file location"),
        }
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config = Config::load().context("failed to load configuration")?;

    let level = logging::effective_level(cli.debug, config.log_level());
    if let Err(e) = logging::init_logging(&level) {
        output::warn(e, Verbosity::from_flags(cli.quiet, cli.debug));
    }

    let ctx = Context {
        data: cli.data,
        debug: cli.debug,
        quiet: cli.quiet,
        config,
    };

    commands::dispatch(cli.command, &ctx)
}
