//! The marias Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::path::{Path, PathBuf};
use std::{fs, io, process};

use clap::Parser;
use miette::Report;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use crate::balance::{group_balances, leaderboard, Standing};
use crate::cli::args::{Command, MariasArgs};
use crate::cli::output::Printer;
use crate::diagnostics::IndexDiagnostic;
use crate::errors::{BalanceError, ConfigError};
use crate::eval::ScoreEvaluator;
use crate::index::{self, IndexDocument};
use crate::options::{HundredRule, ScoringOptions};

pub mod args;
pub mod output;

/// Extension of index files found in directories.
pub const INDEX_EXTENSION: &str = "txt";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{0}")]
    Document(Box<IndexDiagnostic>),
    #[error("play was rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{}: {source}", path.display())]
    Balance {
        path: PathBuf,
        #[source]
        source: BalanceError,
    },
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

/// The main entry point for the CLI.
pub fn run() {
    let args = MariasArgs::parse();
    init_tracing(args.verbose);

    let mut printer = Printer::new();
    let result = match args.command {
        Command::Eval {
            play,
            group_size,
            hundred,
            multiplier,
        } => handle_eval(&mut printer, &play, group_size, hundred, multiplier, args.json),
        Command::Check { file } => handle_check(&mut printer, &file, args.json),
        Command::Balance { paths, groups } => {
            handle_balance(&mut printer, &paths, groups, args.json)
        }
    };

    if let Err(e) = result {
        print_error(e);
        process::exit(1);
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn print_error(error: CliError) {
    match error {
        CliError::Document(diagnostic) => {
            let report = Report::new(*diagnostic);
            eprintln!("{report:?}");
        }
        other => eprintln!("Error: {other}"),
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn handle_eval(
    printer: &mut Printer,
    play: &str,
    group_size: usize,
    hundred: HundredRule,
    multiplier: u32,
    json: bool,
) -> Result<(), CliError> {
    let options = ScoringOptions::new(hundred, multiplier)?;
    let evaluator = ScoreEvaluator::new(group_size, options)?;
    let result = evaluator.evaluate(play);

    if json {
        printer.json(&result)?;
    } else {
        printer.score(play, &result)?;
    }
    if !result.accepted {
        return Err(CliError::Rejected(result.error_message));
    }
    Ok(())
}

fn handle_check(printer: &mut Printer, path: &Path, json: bool) -> Result<(), CliError> {
    let document = read_index(path)?;
    if json {
        printer.json(&document)?;
    } else {
        printer.check_summary(&path.display().to_string(), &document)?;
    }
    Ok(())
}

/// Per-group balances of one index, for `--groups`.
#[derive(Debug, Serialize)]
struct IndexBalances {
    file: String,
    place: String,
    date: String,
    groups: Vec<Vec<(String, i64)>>,
}

#[derive(Debug, Serialize)]
struct BalanceReport<'a> {
    leaderboard: &'a [Standing],
    #[serde(skip_serializing_if = "Option::is_none")]
    indexes: Option<Vec<IndexBalances>>,
}

fn handle_balance(
    printer: &mut Printer,
    paths: &[PathBuf],
    groups: bool,
    json: bool,
) -> Result<(), CliError> {
    let files = discover_index_files(paths)?;
    info!(files = files.len(), "discovered index files");

    let mut documents = Vec::with_capacity(files.len());
    for file in &files {
        documents.push(read_index(file)?);
    }

    let standings = leaderboard(&documents).map_err(|source| CliError::Balance {
        path: common_label(paths),
        source,
    })?;

    let indexes = if groups {
        let mut indexes = Vec::with_capacity(documents.len());
        for (file, document) in files.iter().zip(&documents) {
            indexes.push(index_balances(file, document)?);
        }
        Some(indexes)
    } else {
        None
    };

    if json {
        return Ok(printer.json(&BalanceReport {
            leaderboard: &standings,
            indexes,
        })?);
    }

    for index in indexes.iter().flatten() {
        printer.heading(&format!("{} {} ({})", index.date, index.place, index.file))?;
        for (number, group) in index.groups.iter().enumerate() {
            printer.heading(&format!(" group {}", number + 1))?;
            printer.balances(group.iter().map(|(name, amount)| (name.as_str(), *amount)))?;
        }
    }
    printer.leaderboard(&standings)?;
    Ok(())
}

fn index_balances(file: &Path, document: &IndexDocument) -> Result<IndexBalances, CliError> {
    let groups = document
        .groups
        .iter()
        .map(|group| group_balances(group, document.scoring))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| CliError::Balance {
            path: file.to_path_buf(),
            source,
        })?;
    Ok(IndexBalances {
        file: file.display().to_string(),
        place: document.place.clone(),
        date: document.raw_date.clone(),
        groups,
    })
}

// ============================================================================
// FILES
// ============================================================================

fn read_index(path: &Path) -> Result<IndexDocument, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "reading index");
    index::read(&text).map_err(|error| {
        let name = path.display().to_string();
        CliError::Document(Box::new(IndexDiagnostic::new(error, name, text.as_str())))
    })
}

/// Expand directories into their index files. Files named explicitly are
/// kept whatever their extension; directory results are sorted.
pub fn discover_index_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let mut found = Vec::new();
        for entry in WalkDir::new(path) {
            let entry = entry?;
            if entry.file_type().is_file() && is_index_file(entry.path()) {
                found.push(entry.into_path());
            }
        }
        found.sort();
        files.extend(found);
    }
    Ok(files)
}

fn is_index_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(INDEX_EXTENSION))
}

fn common_label(paths: &[PathBuf]) -> PathBuf {
    match paths {
        [single] => single.clone(),
        _ => PathBuf::from("indexes"),
    }
}
