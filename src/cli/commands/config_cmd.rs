//! config command - Get, set, or list configuration values

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::config::schema::KEYS;
use crate::core::config::Config;
use crate::ui::output;

/// Print one configuration value. Unset keys print nothing.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    if let Some(value) = ctx.config.file.get(key)? {
        output::data(value);
    }
    Ok(())
}

/// Set one configuration value and write the file.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let path = Config::write_path()?;
    let mut file = if path.exists() {
        Config::load_from(&path)
            .with_context(|| format!("failed to load {}", path.display()))?
            .file
    } else {
        Default::default()
    };

    file.set(key, value)?;
    Config::write_to(&path, &file).context("failed to write config")?;

    output::print(format!("Set {} = {}", key, value.trim()), ctx.verbosity());
    Ok(())
}

/// List every key with its effective value.
pub fn list(ctx: &Context) -> Result<()> {
    match ctx.config.loaded_from() {
        Some(path) => output::print(format!("# {}", path.display()), ctx.verbosity()),
        None => output::print("# defaults (no config file)", ctx.verbosity()),
    }

    for key in KEYS {
        let value = match *key {
            "data_file" => Some(ctx.data_file()?.display().to_string()),
            "default_tier" => Some(ctx.config.default_tier().label().to_string()),
            other => ctx.config.file.get(other)?,
        };
        output::data(format!(
            "{} = {}",
            key,
            value.unwrap_or_else(|| "(not set)".to_string())
        ));
    }
    Ok(())
}
