//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens a [`Session`] (read-only, or writable under the data lock)
//! 2. Calls repository operations
//! 3. Commits (reconcile + persist) if it changed anything
//! 4. Formats and displays output

mod ban;
mod browse;
mod comp;
mod completion;
mod config_cmd;
mod hero;
mod reconcile;
mod transfer;

pub use completion::completion;

use anyhow::{Context as _, Result};

use crate::cli::args::{BanAction, Command, CompAction, ConfigAction, HeroAction};
use crate::cli::Context;
use crate::core::lock::DataLock;
use crate::core::reconcile::ReconcileReport;
use crate::core::repository::Repository;
use crate::store::JsonFileStore;
use crate::ui::output;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Hero { action } => match action {
            HeroAction::Add { name, fields } => hero::add(ctx, &name, &fields),
            HeroAction::Edit { name, fields } => hero::edit(ctx, &name, &fields),
            HeroAction::Show { name } => hero::show(ctx, &name),
            HeroAction::Delete { name } => hero::delete(ctx, &name),
        },
        Command::Search { query } => browse::search(ctx, &query),
        Command::List { role, lane, tier } => browse::list(ctx, role, lane, tier),
        Command::Tiers { lane } => browse::tiers(ctx, lane),
        Command::Comp { action } => match action {
            CompAction::Set {
                name,
                members,
                core,
                counters,
            } => comp::set(ctx, &name, &members, core.as_deref(), &counters),
            CompAction::Delete { name } => comp::delete(ctx, &name),
            CompAction::List => comp::list(ctx),
        },
        Command::Ban { action } => match action {
            BanAction::Set { lane, names } => ban::set(ctx, lane, &names),
            BanAction::Show { lane } => ban::show(ctx, lane),
        },
        Command::Reconcile { dry_run } => reconcile::reconcile(ctx, dry_run),
        Command::Import { file } => transfer::import(ctx, &file),
        Command::Export { file } => transfer::export(ctx, file.as_deref()),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value),
            ConfigAction::List => config_cmd::list(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// A loaded repository over the data file, optionally holding the lock.
pub struct Session {
    pub repo: Repository<JsonFileStore>,
    lock: Option<DataLock>,
}

impl Session {
    /// Load the data file for reading. No lock is taken.
    pub fn read_only(ctx: &Context) -> Result<Self> {
        let path = ctx.data_file()?;
        let mut repo = Repository::new(JsonFileStore::new(&path));
        repo.load_all()
            .with_context(|| format!("failed to load {}", path.display()))?;
        Ok(Self { repo, lock: None })
    }

    /// Take the data lock, then load the data file.
    pub fn writable(ctx: &Context) -> Result<Self> {
        let path = ctx.data_file()?;
        let lock = DataLock::acquire(&path)?;
        let mut repo = Repository::new(JsonFileStore::new(&path));
        repo.load_all()
            .with_context(|| format!("failed to load {}", path.display()))?;
        Ok(Self {
            repo,
            lock: Some(lock),
        })
    }

    /// Reconcile, persist and release the lock.
    ///
    /// Returns what reconciliation repaired.
    pub fn save(mut self) -> Result<ReconcileReport> {
        let report = self.repo.reconcile();
        self.repo.persist_all().context("failed to save")?;
        if let Some(mut lock) = self.lock.take() {
            lock.release()?;
        }
        Ok(report)
    }

    /// [`save`](Self::save), then mention any repairs.
    pub fn commit(self, ctx: &Context) -> Result<ReconcileReport> {
        let report = self.save()?;
        if !report.is_clean() {
            output::print(report, ctx.verbosity());
        }
        Ok(report)
    }
}
