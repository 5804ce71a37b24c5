//! ban command - Replace or show ban lists

use anyhow::Result;

use super::hero::names;
use super::Session;
use crate::cli::Context;
use crate::core::types::Lane;
use crate::ui::output;

/// Replace the global list, or one lane's list.
pub fn set(ctx: &Context, lane: Option<Lane>, raw: &[String]) -> Result<()> {
    let banned = names(raw)?;

    let mut session = Session::writable(ctx)?;
    match lane {
        Some(lane) => session.repo.set_lane_bans(lane, banned.iter().map(|n| n.as_str())),
        None => session.repo.set_global_bans(banned.iter().map(|n| n.as_str())),
    }
    session.commit(ctx)?;

    let scope = lane.map_or("global".to_string(), |l| l.label().to_string());
    output::print(
        format!("Set {} bans: {}", scope, output::format_names(&banned)),
        ctx.verbosity(),
    );
    Ok(())
}

/// Show one lane's list, or every list.
pub fn show(ctx: &Context, lane: Option<Lane>) -> Result<()> {
    let session = Session::read_only(ctx)?;
    let bans = session.repo.bans();

    match lane {
        Some(lane) => output::data(output::format_names(bans.lane(lane))),
        None => {
            output::data(format!("global: {}", output::format_names(&bans.global)));
            for lane in Lane::ALL {
                output::data(format!(
                    "{}: {}",
                    lane.label(),
                    output::format_names(bans.lane(lane))
                ));
            }
        }
    }
    Ok(())
}
