//! core::config
//!
//! Configuration loading and writing.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Locations
//!
//! Searched in order, first existing file wins:
//! 1. `$HERODEX_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/herodex/config.toml`
//! 3. `~/.herodex/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use herodex::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("data file: {}", config.data_file().unwrap().display());
//! println!("default tier: {}", config.default_tier());
//! ```

pub mod schema;

pub use schema::{HerodexConfig, LogConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::atomic::write_atomic;
use super::types::Tier;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "HERODEX_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration plus where it came from.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: HerodexConfig,
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// A missing file is not an error; defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read, parsed or
    /// validated.
    pub fn load() -> Result<Self, ConfigError> {
        let candidates = search_paths(
            std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            dirs::home_dir(),
        );

        for path in candidates {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        log::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Load one specific config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: HerodexConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        log::debug!("loaded config from {}", path.display());
        Ok(Self {
            file,
            loaded_from: Some(path.to_path_buf()),
        })
    }

    /// Path the configuration was loaded from, if any.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }

    /// Where `hdx config set` writes.
    ///
    /// `$HERODEX_CONFIG` when set, otherwise `~/.herodex/config.toml`.
    pub fn write_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".herodex/config.toml"))
    }

    /// Validate and write `config` atomically to `path`.
    pub fn write_to(path: &Path, config: &HerodexConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        write_atomic(path, contents.as_bytes()).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    // =========================================================================
    // Accessors with defaults
    // =========================================================================

    /// Path of the JSON data file.
    ///
    /// Defaults to `~/.herodex/heroes.json`.
    pub fn data_file(&self) -> Result<PathBuf, ConfigError> {
        match &self.file.data_file {
            Some(path) => Ok(path.clone()),
            None => {
                let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
                Ok(home.join(".herodex/heroes.json"))
            }
        }
    }

    /// Tier for heroes added without one. Defaults to `T1`.
    pub fn default_tier(&self) -> Tier {
        self.file
            .default_tier
            .as_deref()
            .and_then(Tier::parse)
            .unwrap_or(Tier::T1)
    }

    /// Configured log level, if any.
    pub fn log_level(&self) -> Option<&str> {
        self.file.log.as_ref().and_then(|l| l.level.as_deref())
    }
}

/// Candidate config files in search order.
fn search_paths(env: Option<PathBuf>, xdg: Option<PathBuf>, home: Option<PathBuf>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    paths.extend(env);
    paths.extend(xdg.map(|dir| dir.join("herodex/config.toml")));
    paths.extend(home.map(|dir| dir.join(".herodex/config.toml")));
    paths
}
