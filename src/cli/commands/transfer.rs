//! import and export commands - Move whole datasets in and out

use anyhow::{Context as _, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

use super::Session;
use crate::cli::Context;
use crate::core::atomic::write_atomic;
use crate::ui::output;

/// Replace the dataset with the contents of `file`.
pub fn import(ctx: &Context, file: &Path) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let raw: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    let mut session = Session::writable(ctx)?;
    let report = session.repo.import_value(&raw);
    let heroes = session.repo.heroes().len();
    let comps = session.repo.compositions().len();
    session.commit(ctx)?;

    output::print(
        format!(
            "Imported {} heroes, {} compositions; {}",
            heroes, comps, report
        ),
        ctx.verbosity(),
    );
    Ok(())
}

/// Write the dataset to `file`, or stdout.
pub fn export(ctx: &Context, file: Option<&Path>) -> Result<()> {
    let session = Session::read_only(ctx)?;
    let value = session.repo.export_value()?;
    let mut text = serde_json::to_string_pretty(&value).context("failed to encode dataset")?;
    text.push('\n');

    match file {
        Some(path) => {
            write_atomic(path, text.as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?;
            output::print(
                format!(
                    "Exported {} heroes to {}",
                    session.repo.heroes().len(),
                    path.display()
                ),
                ctx.verbosity(),
            );
        }
        None => print!("{}", text),
    }
    Ok(())
}
