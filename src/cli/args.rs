//! Defines the command-line arguments and subcommands for the marias CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::errors::MIN_GROUP_SIZE;
use crate::options::HundredRule;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "marias",
    version,
    about = "Scores mariáš play codes and tournament indexes."
)]
pub struct MariasArgs {
    /// Log more: -v for info, -vv for debug. RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a single play code. Use `--` before codes starting with `-`.
    Eval {
        /// The play code, for example `$:-k110*`.
        #[arg(required = true, allow_hyphen_values = true)]
        play: String,
        /// Number of players in the group.
        #[arg(long, short = 'g', default_value_t = MIN_GROUP_SIZE)]
        group_size: usize,
        /// How a hundred's score scales its value.
        #[arg(long, value_enum, default_value_t = HundredRule::Multiplicative)]
        hundred: HundredRule,
        /// Stake multiplier.
        #[arg(long, short = 'm', default_value_t = 1)]
        multiplier: u32,
    },
    /// Read and validate an index document.
    Check {
        /// The path to the index file.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Compute the leaderboard of one or more indexes.
    Balance {
        /// Index files, or directories searched for `*.txt` indexes.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Also print the balances of every group.
        #[arg(long)]
        groups: bool,
    },
}
