//! search, list and tiers commands - Read-only views of the hero collection

use anyhow::Result;

use super::Session;
use crate::cli::Context;
use crate::core::query::{lane_tier_ranking, search as find, tier_ranking, HeroFilter};
use crate::core::types::{Lane, Role, Tier};
use crate::ui::output;

/// Print heroes whose name matches `query`.
pub fn search(ctx: &Context, query: &str) -> Result<()> {
    let session = Session::read_only(ctx)?;
    let hits = find(session.repo.heroes(), query);
    if hits.is_empty() {
        output::print(format!("No heroes match '{}'", query), ctx.verbosity());
        return Ok(());
    }
    output::data(output::format_list(&hits, ""));
    Ok(())
}

/// Print heroes passing the filter, one per line with tier.
pub fn list(ctx: &Context, role: Option<Role>, lane: Option<Lane>, tier: Option<Tier>) -> Result<()> {
    let session = Session::read_only(ctx)?;
    let heroes = session.repo.heroes();
    let filter = HeroFilter { role, lane, tier };

    let names = filter.apply(heroes);
    if names.is_empty() {
        output::print("No heroes", ctx.verbosity());
        return Ok(());
    }

    for name in names {
        let tier = heroes
            .get(name)
            .and_then(|record| record.tier)
            .map(|t| t.label())
            .unwrap_or("-");
        output::data(format!("{:<4} {}", tier, name));
    }
    if filter == HeroFilter::default() {
        output::print(format!("{} heroes", heroes.len()), ctx.verbosity());
    }
    Ok(())
}

/// Print the global or per-lane tier ranking.
pub fn tiers(ctx: &Context, lane: Option<Lane>) -> Result<()> {
    let session = Session::read_only(ctx)?;
    let heroes = session.repo.heroes();
    let groups = match lane {
        Some(lane) => lane_tier_ranking(heroes, lane),
        None => tier_ranking(heroes),
    };
    output::data(output::format_tier_groups(&groups));
    Ok(())
}
