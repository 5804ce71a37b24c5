//! reconcile command - Repair relationship inconsistencies

use anyhow::Result;

use super::Session;
use crate::cli::Context;
use crate::core::reconcile::audit;
use crate::ui::output;

/// Reconcile and save, or with `dry_run` only report.
pub fn reconcile(ctx: &Context, dry_run: bool) -> Result<()> {
    if dry_run {
        let session = Session::read_only(ctx)?;
        let report = audit(session.repo.heroes());
        output::data(format!("dry run: {}", report));
        return Ok(());
    }

    let report = Session::writable(ctx)?.save()?;
    output::data(report);
    Ok(())
}
