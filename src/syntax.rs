//! Syntax module for play codes
//!
//! This module provides the structured form of a parsed play code: the
//! contracts a player can commit to, the two commitment parts of a play and
//! the play record itself. `PlayRecord` renders back to a canonical play code
//! through `Display`.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod parser;

pub use parser::parse;

/// Represents a span in a source text, in characters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Every contract that can appear in a play code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Contract {
    Fold,
    MinorFault,
    MajorFault,
    Game,
    SilentSeven,
    Seven,
    SilentHundred,
    Hundred,
    Betl,
    MajklBetl,
    MajklSuperBetl,
    Durch,
    TwoSevens,
}

impl Contract {
    /// Base value in minor currency units before score, boost and trump.
    pub fn base_value(self) -> i64 {
        match self {
            Contract::Fold => 60,
            Contract::MinorFault => 100,
            Contract::MajorFault => 500,
            Contract::Game => 10,
            Contract::SilentSeven => 10,
            Contract::Seven => 20,
            Contract::SilentHundred => 20,
            Contract::Hundred => 40,
            Contract::Betl => 150,
            Contract::MajklBetl => 150,
            Contract::MajklSuperBetl => 150,
            Contract::Durch => 300,
            Contract::TwoSevens => 400,
        }
    }

    /// Keyword used for the contract inside a play code.
    pub fn code(self) -> &'static str {
        match self {
            Contract::Fold => "e",
            Contract::MinorFault => "r1",
            Contract::MajorFault => "r2",
            Contract::Game => "h",
            Contract::SilentSeven => "n",
            Contract::Seven => "s",
            Contract::SilentHundred => "t",
            Contract::Hundred => "k",
            Contract::Betl => "c",
            Contract::MajklBetl => "mc",
            Contract::MajklSuperBetl => "msc",
            Contract::Durch => "d",
            Contract::TwoSevens => "v",
        }
    }

    /// Name of the contract as players call it at the table.
    pub fn label(self) -> &'static str {
        match self {
            Contract::Fold => "omyl",
            Contract::MinorFault => "r1",
            Contract::MajorFault => "r2",
            Contract::Game => "hra",
            Contract::SilentSeven => "tichá sedma",
            Contract::Seven => "sedma",
            Contract::SilentHundred => "tiché kilo",
            Contract::Hundred => "kilo",
            Contract::Betl => "cedník",
            Contract::MajklBetl => "majklův cedník",
            Contract::MajklSuperBetl => "majklův super cedník",
            Contract::Durch => "durch",
            Contract::TwoSevens => "dvě sedmy",
        }
    }

    /// Literal plays are complete on their own: no sign, boost or link.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Contract::Fold | Contract::MinorFault | Contract::MajorFault
        )
    }

    /// Contracts whose value is scaled by the score of the hand.
    pub fn has_score(self) -> bool {
        matches!(self, Contract::Hundred | Contract::SilentHundred)
    }

    /// Betl and durch variants cannot be played in the better suit.
    pub fn allows_trump(self) -> bool {
        !matches!(
            self,
            Contract::Betl | Contract::MajklBetl | Contract::MajklSuperBetl | Contract::Durch
        )
    }
}

/// Score of a hand when no score is given.
pub const DEFAULT_SCORE: i64 = 100;

/// One side of a play: the base commitment or the commitment linked to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentPart {
    pub solo_parity: bool,
    pub base_payment: bool,
    pub win: bool,
    pub boost: u8,
    pub contract: Option<Contract>,
    pub score: i64,
}

impl Default for CommitmentPart {
    fn default() -> Self {
        Self {
            solo_parity: false,
            base_payment: false,
            win: false,
            boost: 0,
            contract: None,
            score: DEFAULT_SCORE,
        }
    }
}

impl CommitmentPart {
    pub(crate) fn literal(contract: Contract) -> Self {
        Self {
            contract: Some(contract),
            ..Self::default()
        }
    }

    pub fn base_value(&self) -> i64 {
        self.contract.map_or(0, Contract::base_value)
    }

    pub fn label(&self) -> &'static str {
        self.contract.map_or("", Contract::label)
    }

    pub fn is_empty(&self) -> bool {
        self.contract.is_none()
    }

    fn write_parity(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.solo_parity {
            f.write_str("$")?;
        }
        if self.base_payment {
            f.write_str(":")?;
        }
        Ok(())
    }

    fn write_commitment(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.win { "+" } else { "-" })?;
        if self.boost > 0 {
            write!(f, "{}", self.boost)?;
        }
        if let Some(contract) = self.contract {
            f.write_str(contract.code())?;
            if contract.has_score() {
                write!(f, "{}", self.score)?;
            }
        }
        Ok(())
    }
}

/// A fully parsed play code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlayRecord {
    pub base: CommitmentPart,
    pub link: CommitmentPart,
    pub trump_doubled: bool,
    pub comment: Option<String>,
}

impl PlayRecord {
    /// The same play without its comment.
    pub fn without_comment(&self) -> Self {
        Self {
            comment: None,
            ..self.clone()
        }
    }
}

impl fmt::Display for PlayRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.base.contract {
            Some(contract) if contract.is_literal() => f.write_str(contract.code())?,
            _ => {
                self.base.write_parity(f)?;
                self.base.write_commitment(f)?;
                // Parity markers of a hundred or two sevens stay in the code even without a link.
                self.link.write_parity(f)?;
                if !self.link.is_empty() {
                    self.link.write_commitment(f)?;
                }
                if self.trump_doubled {
                    f.write_str("*")?;
                }
            }
        }
        if let Some(comment) = &self.comment {
            write!(f, "{{{}}}", comment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_renders_bare_code() {
        let record = PlayRecord {
            base: CommitmentPart::literal(Contract::MajorFault),
            ..PlayRecord::default()
        };
        assert_eq!(record.to_string(), "r2");
    }

    #[test]
    fn test_hundred_with_silent_seven_renders_score() {
        let record = PlayRecord {
            base: CommitmentPart {
                win: true,
                contract: Some(Contract::Hundred),
                score: 130,
                ..CommitmentPart::default()
            },
            link: CommitmentPart {
                contract: Some(Contract::SilentSeven),
                ..CommitmentPart::default()
            },
            trump_doubled: true,
            comment: Some("pěkné".to_string()),
        };
        assert_eq!(record.to_string(), "+k130-n*{pěkné}");
    }

    #[test]
    fn test_contract_tables_agree() {
        assert_eq!(Contract::TwoSevens.base_value(), 400);
        assert!(!Contract::Durch.allows_trump());
        assert!(Contract::SilentHundred.has_score());
        assert_eq!(CommitmentPart::default().base_value(), 0);
    }
}
