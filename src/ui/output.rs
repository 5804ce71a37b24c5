//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Everything the user reads goes through here and respects `--quiet`.
//! Errors are always shown. Diagnostics go through `log`, not this module.

use std::fmt::Display;

use crate::core::model::{CompositionRecord, HeroRecord};
use crate::core::query::TierGroup;
use crate::core::types::{HeroName, Lane};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors and requested data only.
    Quiet,
    Normal,
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags. `--quiet` wins.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a status message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print requested data. Always shown, quiet or not.
pub fn data(message: impl Display) {
    println!("{}", message);
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Join names with ", ", or "-" when there are none.
pub fn format_names<'a>(names: impl IntoIterator<Item = &'a HeroName>) -> String {
    let joined = names
        .into_iter()
        .map(HeroName::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// Multi-line detail view of one hero.
pub fn format_hero(name: &str, record: &HeroRecord) -> String {
    let roles = record
        .roles
        .iter()
        .map(|r| r.label())
        .collect::<Vec<_>>()
        .join(", ");
    let lanes = record
        .lanes
        .iter()
        .map(|lane| match record.lane_tier(*lane) {
            Some(tier) => format!("{} ({})", lane.label(), tier),
            None => lane.label().to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        name.to_string(),
        format!("  tier:         {}", record.tier.map(|t| t.label()).unwrap_or("-")),
        format!("  roles:        {}", or_dash(&roles)),
        format!("  lanes:        {}", or_dash(&lanes)),
        format!(
            "  main lane:    {}",
            record.main_lane.map(Lane::label).unwrap_or("-")
        ),
        format!("  counters:     {}", format_names(&record.counters)),
        format!("  countered by: {}", format_names(&record.countered_by)),
        format!("  synergy:      {}", format_names(&record.synergy)),
        format!("  ban targets:  {}", format_names(&record.ban_targets)),
    ];
    if !record.image.is_empty() {
        lines.push(format!("  image:        {}", record.image));
    }
    if !record.notes.is_empty() {
        lines.push(format!("  notes:        {}", record.notes));
    }
    lines.join("\n")
}

/// One line per composition.
pub fn format_composition(name: &str, record: &CompositionRecord) -> String {
    let core = record.core.as_ref().map(HeroName::as_str).unwrap_or("-");
    format!(
        "{}: {} (core: {}; weak against: {})",
        name,
        format_names(&record.members),
        core,
        format_names(&record.counters)
    )
}

/// One line per tier group.
pub fn format_tier_groups(groups: &[TierGroup<'_>]) -> String {
    groups
        .iter()
        .map(|group| {
            let label = group.tier.map(|t| t.label()).unwrap_or("unranked");
            format!("{:<9} {}", label, format_names(group.heroes.iter().copied()))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}
