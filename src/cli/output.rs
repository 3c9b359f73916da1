//! Handles all user-facing output for the CLI.
//!
//! This module is responsible for colorizing output, aligning tables and
//! generating JSON. Colors are used only when stdout is a terminal.

use std::io::{self, Write};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use unicode_width::UnicodeWidthStr;

use crate::balance::Standing;
use crate::eval::ScoreResult;
use crate::index::IndexDocument;

/// Render minor currency units as Czech crowns, e.g. `-120` as `-1,20 Kč`.
pub fn format_amount(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!("{sign}{},{:02} Kč", abs / 100, abs % 100)
}

/// Writes command results to stdout.
pub struct Printer {
    stdout: StandardStream,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        let choice = if atty::is(atty::Stream::Stdout) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stdout: StandardStream::stdout(choice),
        }
    }

    pub fn json<T: Serialize + ?Sized>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.stdout, value)?;
        writeln!(self.stdout)
    }

    pub fn score(&mut self, play: &str, result: &ScoreResult) -> io::Result<()> {
        if !result.accepted {
            self.colored(Color::Red, "rejected")?;
            return writeln!(self.stdout, " {play}: {}", result.error_message);
        }

        self.colored(Color::Green, "accepted")?;
        writeln!(self.stdout, " {play} ({})", result.labels.join(" + "))?;
        writeln!(self.stdout, "  own:   {}", format_amount(result.own_value))?;
        writeln!(self.stdout, "  enemy: {}", format_amount(result.enemy_value))?;
        if let Some(comment) = &result.comment {
            writeln!(self.stdout, "  comment: {comment}")?;
        }
        Ok(())
    }

    pub fn check_summary(&mut self, name: &str, document: &IndexDocument) -> io::Result<()> {
        self.colored(Color::Green, "ok")?;
        writeln!(self.stdout, " {name}")?;
        writeln!(
            self.stdout,
            "  {} {} ({} hundred, stake x{})",
            document.raw_date,
            document.place,
            document.scoring.hundred_rule,
            document.scoring.stake_multiplier
        )?;
        writeln!(
            self.stdout,
            "  {} groups, {} players, {} plays",
            document.groups.len(),
            document.player_names().len(),
            document.play_count()
        )
    }

    pub fn heading(&mut self, text: &str) -> io::Result<()> {
        self.stdout
            .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
        writeln!(self.stdout, "{text}")?;
        self.stdout.reset()
    }

    /// Name and amount columns, names padded to the widest one.
    pub fn balances<'a, I>(&mut self, rows: I) -> io::Result<()>
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        let rows: Vec<_> = rows.into_iter().collect();
        let width = rows.iter().map(|(name, _)| name.width()).max().unwrap_or(0);
        for (name, amount) in rows {
            let padding = " ".repeat(width - name.width());
            write!(self.stdout, "  {name}{padding}  ")?;
            self.amount(amount)?;
            writeln!(self.stdout)?;
        }
        Ok(())
    }

    pub fn leaderboard(&mut self, standings: &[Standing]) -> io::Result<()> {
        self.heading("Leaderboard")?;
        self.balances(
            standings
                .iter()
                .map(|standing| (standing.name.as_str(), standing.balance)),
        )
    }

    fn amount(&mut self, amount: i64) -> io::Result<()> {
        let color = match amount.signum() {
            1 => Some(Color::Green),
            -1 => Some(Color::Red),
            _ => None,
        };
        self.stdout.set_color(ColorSpec::new().set_fg(color))?;
        write!(self.stdout, "{:>14}", format_amount(amount))?;
        self.stdout.reset()
    }

    fn colored(&mut self, color: Color, text: &str) -> io::Result<()> {
        self.stdout
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(self.stdout, "{text}")?;
        self.stdout.reset()
    }
}
