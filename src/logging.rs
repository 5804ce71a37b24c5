//! logging
//!
//! Process-wide stderr logger.
//!
//! # Invariants
//! - Initialization happens at most once per process.
//! - Re-initializing with the same level is a no-op; a different level is
//!   rejected.
//! - Initialization never panics.

use flexi_logger::{Logger, LoggerHandle};
use once_cell::sync::OnceCell;

use crate::core::config::schema::VALID_LOG_LEVELS;

/// Level used when nothing else is configured.
pub const DEFAULT_LEVEL: &str = "warn";

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: String,
    _logger: LoggerHandle,
}

/// Pick the effective level from CLI flag and config.
///
/// `--debug` wins, then the configured level, then [`DEFAULT_LEVEL`].
pub fn effective_level(debug: bool, configured: Option<&str>) -> String {
    if debug {
        return "debug".to_string();
    }
    configured
        .map(|l| l.trim().to_ascii_lowercase())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// Start the stderr logger at `level`.
///
/// # Errors
/// - Returns an error when `level` is unsupported.
/// - Returns an error when already initialized with another level.
/// - Returns an error when the logger backend fails to start.
pub fn init_logging(level: &str) -> Result<(), String> {
    let level = normalize_level(level)?;

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, String> {
        let logger = Logger::try_with_str(&level)
            .map_err(|err| format!("invalid log level `{level}`: {err}"))?
            .log_to_stderr()
            .format(flexi_logger::default_format)
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))?;

        log::debug!(
            "event=logging_init level={} version={}",
            level,
            env!("CARGO_PKG_VERSION")
        );

        Ok(LoggingState {
            level: level.clone(),
            _logger: logger,
        })
    })?;

    if state.level != level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            state.level, level
        ));
    }
    Ok(())
}

fn normalize_level(level: &str) -> Result<String, String> {
    let level = level.trim().to_ascii_lowercase();
    if VALID_LOG_LEVELS.contains(&level.as_str()) {
        Ok(level)
    } else {
        Err(format!(
            "unsupported log level `{}`; expected one of: {}",
            level,
            VALID_LOG_LEVELS.join(", ")
        ))
    }
}
