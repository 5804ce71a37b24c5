//! comp command - Manage team compositions

use anyhow::{bail, Result};

use super::hero::names;
use super::Session;
use crate::cli::Context;
use crate::core::model::CompositionRecord;
use crate::core::types::HeroName;
use crate::ui::output;

/// Create or replace a composition.
///
/// Members and counters may name heroes that do not exist yet; a warning
/// is printed for each.
pub fn set(
    ctx: &Context,
    name: &str,
    members: &[String],
    core: Option<&str>,
    counters: &[String],
) -> Result<()> {
    let record = CompositionRecord {
        members: names(members)?,
        core: core.map(HeroName::new).transpose()?,
        counters: names(counters)?,
    };

    let mut session = Session::writable(ctx)?;
    for hero in record.members.iter().chain(&record.counters).chain(&record.core) {
        if session.repo.hero(hero.as_str()).is_none() {
            output::warn(format!("'{}' is not a known hero", hero), ctx.verbosity());
        }
    }
    let name = session.repo.upsert_composition(name, record)?;
    session.commit(ctx)?;

    output::print(format!("Saved composition '{}'", name), ctx.verbosity());
    Ok(())
}

pub fn delete(ctx: &Context, name: &str) -> Result<()> {
    let mut session = Session::writable(ctx)?;
    if session.repo.composition(name).is_none() {
        bail!("no composition named '{}'", name.trim());
    }
    session.repo.delete_composition(name);
    session.commit(ctx)?;

    output::print(format!("Deleted composition '{}'", name.trim()), ctx.verbosity());
    Ok(())
}

pub fn list(ctx: &Context) -> Result<()> {
    let session = Session::read_only(ctx)?;
    let comps = session.repo.compositions();
    if comps.is_empty() {
        output::print("No compositions", ctx.verbosity());
        return Ok(());
    }
    for (name, record) in comps {
        output::data(output::format_composition(name.as_str(), record));
    }
    Ok(())
}
