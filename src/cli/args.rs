//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--data <path>`: Use this data file instead of the configured one
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::{Lane, Role, Tier};

/// herodex - hero strategy notes for Arena of Valor
#[derive(Parser, Debug)]
#[command(name = "hdx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Data file to read and write
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add, edit, show or delete heroes
    #[command(
        name = "hero",
        after_help = "\
WORKFLOW EXAMPLES:
    # Add a mid-lane mage, strong against two others
    hdx hero add Lauriel --tier T0 --role mage --lane mid --counters Zill,Krixi

    # Rank it per lane
    hdx hero edit Lauriel --lane-tier mid=T0 --lane-tier roam=T3

    # Show everything known about it
    hdx hero show Lauriel"
    )]
    Hero {
        #[command(subcommand)]
        action: HeroAction,
    },

    /// Find heroes by name
    #[command(
        name = "search",
        long_about = "Find heroes by name.\n\n\
            Matches names containing the query, either verbatim or ignoring case \
            and whitespace."
    )]
    Search {
        /// Part of a hero name
        query: String,
    },

    /// List heroes, optionally filtered
    #[command(name = "list")]
    List {
        /// Only heroes with this role
        #[arg(long)]
        role: Option<Role>,

        /// Only heroes playing this lane
        #[arg(long)]
        lane: Option<Lane>,

        /// Only heroes of this global tier
        #[arg(long)]
        tier: Option<Tier>,
    },

    /// Show the tier ranking
    #[command(name = "tiers")]
    Tiers {
        /// Rank by tier in this lane instead of the global tier
        #[arg(long)]
        lane: Option<Lane>,
    },

    /// Manage team compositions
    #[command(name = "comp")]
    Comp {
        #[command(subcommand)]
        action: CompAction,
    },

    /// Manage ban lists
    #[command(name = "ban")]
    Ban {
        #[command(subcommand)]
        action: BanAction,
    },

    /// Repair relationship inconsistencies
    #[command(
        name = "reconcile",
        long_about = "Repair relationship inconsistencies.\n\n\
            Drops references to heroes that do not exist or to the hero itself, \
            and mirrors every 'counters' entry into the other hero's \
            'countered by' list and back.",
        after_help = "\
WORKFLOW EXAMPLES:
    # See what would be repaired
    hdx reconcile --dry-run

    # Repair and save
    hdx reconcile"
    )]
    Reconcile {
        /// Report without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Replace the dataset with the contents of a JSON file
    #[command(
        name = "import",
        long_about = "Replace the dataset with the contents of a JSON file.\n\n\
            Accepts snapshots written by 'hdx export' as well as older layouts. \
            Relationships are reconciled after import."
    )]
    Import {
        /// File to import
        file: PathBuf,
    },

    /// Write the dataset as JSON
    #[command(name = "export")]
    Export {
        /// Output file (stdout when omitted)
        file: Option<PathBuf>,
    },

    /// Get, set, or list configuration values
    #[command(
        name = "config",
        after_help = "\
WORKFLOW EXAMPLES:
    # List all configuration values
    hdx config list

    # Keep data somewhere else
    hdx config set data_file ~/Dropbox/heroes.json

    # New heroes start unranked at T2
    hdx config set default_tier T2"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    hdx completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    hdx completion zsh >> ~/.zshrc"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Hero subcommands
#[derive(Subcommand, Debug)]
pub enum HeroAction {
    /// Add a hero, replacing any existing one with the same name
    Add {
        /// Hero name
        name: String,

        #[command(flatten)]
        fields: HeroFields,
    },
    /// Change the given fields of an existing hero
    Edit {
        /// Hero name
        name: String,

        #[command(flatten)]
        fields: HeroFields,
    },
    /// Show one hero
    Show {
        /// Hero name
        name: String,
    },
    /// Delete a hero and every reference to it
    Delete {
        /// Hero name
        name: String,
    },
}

/// Hero attribute flags shared by `add` and `edit`.
///
/// List flags accept repeated use or comma-separated values.
#[derive(Args, Debug, Clone, Default)]
pub struct HeroFields {
    /// Global tier (T0 strongest)
    #[arg(long)]
    pub tier: Option<Tier>,

    /// Role(s)
    #[arg(long = "role", value_delimiter = ',')]
    pub roles: Vec<Role>,

    /// Lane(s) in preference order
    #[arg(long = "lane", value_delimiter = ',')]
    pub lanes: Vec<Lane>,

    /// Main lane (must be one of the lanes)
    #[arg(long)]
    pub main_lane: Option<Lane>,

    /// Tier in one lane, as LANE=TIER
    #[arg(long = "lane-tier", value_name = "LANE=TIER", value_parser = parse_lane_tier)]
    pub lane_tiers: Vec<(Lane, Tier)>,

    /// Heroes this hero is strong against
    #[arg(long, value_delimiter = ',')]
    pub counters: Vec<String>,

    /// Heroes strong against this hero
    #[arg(long, value_delimiter = ',')]
    pub countered_by: Vec<String>,

    /// Heroes that pair well with this hero
    #[arg(long, value_delimiter = ',')]
    pub synergy: Vec<String>,

    /// Heroes to ban when playing this hero
    #[arg(long, value_delimiter = ',')]
    pub ban_targets: Vec<String>,

    /// Image reference
    #[arg(long)]
    pub image: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

/// Parse `LANE=TIER`, e.g. `mid=T0`.
pub fn parse_lane_tier(s: &str) -> Result<(Lane, Tier), String> {
    let (lane, tier) = s
        .split_once('=')
        .ok_or_else(|| format!("expected LANE=TIER, got '{}'", s))?;
    let lane = lane.parse::<Lane>().map_err(|e| e.to_string())?;
    let tier = tier.parse::<Tier>().map_err(|e| e.to_string())?;
    Ok((lane, tier))
}

/// Composition subcommands
#[derive(Subcommand, Debug)]
pub enum CompAction {
    /// Create or replace a composition
    Set {
        /// Composition name
        name: String,

        /// Member heroes
        #[arg(long, value_delimiter = ',')]
        members: Vec<String>,

        /// Core hero
        #[arg(long)]
        core: Option<String>,

        /// Heroes this composition is weak against
        #[arg(long, value_delimiter = ',')]
        counters: Vec<String>,
    },
    /// Delete a composition
    Delete {
        /// Composition name
        name: String,
    },
    /// List compositions
    List,
}

/// Ban subcommands
#[derive(Subcommand, Debug)]
pub enum BanAction {
    /// Replace a ban list
    Set {
        /// Lane ban list to replace (global list when omitted)
        #[arg(long)]
        lane: Option<Lane>,

        /// Heroes to ban; none clears the list
        names: Vec<String>,
    },
    /// Show ban lists
    Show {
        /// Only this lane
        #[arg(long)]
        lane: Option<Lane>,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
