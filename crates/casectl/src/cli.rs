//! Command-line surface for casectl

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use casedesk_common::{CaseType, Severity};

#[derive(Parser, Debug)]
#[command(name = "casectl")]
#[command(about = "Casedesk - follow-up and strike schedules for support cases", long_about = None)]
#[command(version = env!("CASECTL_VERSION"))]
pub struct Cli {
    /// Cases file (overrides storage.cases_file)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Config file (default: ~/.config/casedesk/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add or update a case and print its schedule
    Add {
        case_number: String,

        /// follow-up or strike
        #[arg(long = "type", short = 't')]
        case_type: CaseType,

        /// Last contact day, or "today"
        #[arg(long, short = 'd')]
        day: String,

        /// B or C
        #[arg(long, short = 's')]
        severity: Severity,
    },

    /// List stored cases
    List {
        /// Only cases of this type
        #[arg(long = "type", short = 't')]
        case_type: Option<CaseType>,
    },

    /// Show the schedule of a stored case
    Show {
        case_number: String,

        #[arg(long = "type", short = 't')]
        case_type: CaseType,
    },

    /// Delete a stored case
    Delete {
        case_number: String,

        #[arg(long = "type", short = 't')]
        case_type: CaseType,
    },

    /// Compute a schedule without storing anything
    Schedule {
        #[arg(long = "type", short = 't')]
        case_type: CaseType,

        #[arg(long, short = 'd')]
        day: String,

        #[arg(long, short = 's')]
        severity: Severity,
    },

    /// Print the effective configuration
    Config,
}
