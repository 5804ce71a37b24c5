//! hero command - Add, edit, show or delete heroes

use anyhow::{bail, Result};
use std::collections::BTreeSet;

use super::Session;
use crate::cli::args::HeroFields;
use crate::cli::Context;
use crate::core::model::HeroRecord;
use crate::core::types::HeroName;
use crate::ui::output;

/// Add a hero, replacing one with the same name.
///
/// Unset tier falls back to the configured default tier. Counter links the
/// replaced record had and the new one lacks are removed on both sides.
pub fn add(ctx: &Context, name: &str, fields: &HeroFields) -> Result<()> {
    let mut record = HeroRecord::new();
    record.tier = Some(ctx.config.default_tier());
    apply(&mut record, fields)?;

    let mut session = Session::writable(ctx)?;
    let replaced = session.repo.hero(name).is_some();
    let name = session.repo.upsert_hero(name, record)?;
    session.commit(ctx)?;

    let verb = if replaced { "Replaced" } else { "Added" };
    output::print(format!("{} hero '{}'", verb, name), ctx.verbosity());
    Ok(())
}

/// Change only the given fields of an existing hero.
pub fn edit(ctx: &Context, name: &str, fields: &HeroFields) -> Result<()> {
    let mut session = Session::writable(ctx)?;
    let Some(mut record) = session.repo.hero(name).cloned() else {
        bail!("no hero named '{}'", name.trim());
    };
    apply(&mut record, fields)?;
    session.repo.upsert_hero(name, record)?;
    session.commit(ctx)?;

    output::print(format!("Updated hero '{}'", name.trim()), ctx.verbosity());
    Ok(())
}

pub fn show(ctx: &Context, name: &str) -> Result<()> {
    let session = Session::read_only(ctx)?;
    let Some(record) = session.repo.hero(name) else {
        bail!("no hero named '{}'", name.trim());
    };
    output::data(output::format_hero(name.trim(), record));
    Ok(())
}

/// Delete a hero and strip every reference to it.
pub fn delete(ctx: &Context, name: &str) -> Result<()> {
    let mut session = Session::writable(ctx)?;
    if session.repo.hero(name).is_none() {
        bail!("no hero named '{}'", name.trim());
    }
    let stripped = session.repo.delete_hero(name);
    session.commit(ctx)?;

    output::print(
        format!(
            "Deleted hero '{}' ({} references removed)",
            name.trim(),
            stripped
        ),
        ctx.verbosity(),
    );
    Ok(())
}

/// Copy every flag that was given onto `record`.
fn apply(record: &mut HeroRecord, fields: &HeroFields) -> Result<()> {
    if let Some(tier) = fields.tier {
        record.tier = Some(tier);
    }
    if !fields.roles.is_empty() {
        record.roles = fields.roles.iter().copied().collect();
    }
    if !fields.lanes.is_empty() {
        record.lanes = fields.lanes.clone();
    }
    if let Some(lane) = fields.main_lane {
        if !record.lanes.contains(&lane) {
            bail!("main lane {} is not one of the hero's lanes", lane);
        }
        record.main_lane = Some(lane);
    }
    for (lane, tier) in &fields.lane_tiers {
        record.lane_tiers.insert(*lane, Some(*tier));
    }

    if !fields.counters.is_empty() {
        record.counters = names(&fields.counters)?;
    }
    if !fields.countered_by.is_empty() {
        record.countered_by = names(&fields.countered_by)?;
    }
    if !fields.synergy.is_empty() {
        record.synergy = names(&fields.synergy)?;
    }
    if !fields.ban_targets.is_empty() {
        record.ban_targets = names(&fields.ban_targets)?;
    }

    if let Some(image) = &fields.image {
        record.image = image.trim().to_string();
    }
    if let Some(notes) = &fields.notes {
        record.notes = notes.clone();
    }
    Ok(())
}

pub(super) fn names(raw: &[String]) -> Result<BTreeSet<HeroName>> {
    raw.iter()
        .map(|n| HeroName::new(n).map_err(Into::into))
        .collect()
}
