use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use sincer_core::SwapMode;

const GLOB_FIRST: &str = "glob pattern; the first matching record is used";
const GLOB_SET: &str = "glob pattern; every matching record is used";
const DATE_HELP: &str =
    "date time, e.g. '2024-04-13T10:30:00Z', '2024-04-13 10:30' or '04-13-2024 10:30:00'";

/// Main CLI structure
#[derive(Parser)]
#[command(name = "sincer")]
#[command(about = "Keep track of how much time has passed since things happened")]
#[command(version)]
pub struct Cli {
    /// Config file (overrides SINCER_CONFIG; defaults to ~/.sincer.yaml)
    #[arg(short, long, global = true, env = "SINCER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Show what would change without writing the config file
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print records
    #[command(visible_alias = "ls")]
    List {
        #[arg(help = GLOB_SET)]
        pattern: Option<String>,

        /// Output as JSON for machine processing
        #[arg(long)]
        json: bool,
    },

    /// Create a new record
    #[command(visible_aliases = ["new", "add", "make", "start"])]
    Create {
        /// Record name (defaults to timer-<n>)
        name: Option<String>,

        #[arg(long, help = DATE_HELP)]
        date: Option<String>,

        /// Hex color, e.g. '#ff8800'
        #[arg(long)]
        color: Option<String>,

        /// Add at the bottom of the list instead of the top
        #[arg(long)]
        below: bool,
    },

    /// Change the date or color of a record
    #[command(visible_aliases = ["ch", "update"])]
    Change {
        #[arg(help = GLOB_FIRST)]
        name: String,

        #[arg(long, help = DATE_HELP)]
        date: Option<String>,

        /// Hex color, e.g. '#ff8800'
        #[arg(long)]
        color: Option<String>,
    },

    /// Restart a record from now
    #[command(visible_aliases = ["rd", "redate", "rs"])]
    Restart {
        #[arg(help = GLOB_FIRST)]
        name: String,
    },

    /// Rename a record
    #[command(visible_alias = "rn")]
    Rename {
        #[arg(help = GLOB_FIRST)]
        name: String,

        /// New record name
        newname: Option<String>,
    },

    /// Swap two records (names or places)
    #[command(visible_alias = "sw")]
    Swap {
        /// What to exchange
        #[arg(value_enum)]
        mode: SwapArg,

        #[arg(help = GLOB_FIRST)]
        name: String,

        #[arg(help = GLOB_FIRST)]
        name2: String,
    },

    /// Move a record up or down the list
    Move {
        #[arg(help = GLOB_FIRST)]
        name: String,

        /// u<count>, d<count>, umax or dmax
        #[arg(allow_hyphen_values = true)]
        step: String,
    },

    /// Delete records
    #[command(visible_alias = "rm")]
    Remove {
        #[arg(help = GLOB_SET)]
        pattern: Option<String>,
    },

    /// Delete all records and reset the name counter
    Reset,
}

/// Swap modes as accepted on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SwapArg {
    Places,
    Names,
}

impl From<SwapArg> for SwapMode {
    fn from(arg: SwapArg) -> Self {
        match arg {
            SwapArg::Places => SwapMode::Places,
            SwapArg::Names => SwapMode::Names,
        }
    }
}
