//! # Score Evaluation
//!
//! Turns a parsed play into money. Every play is valued twice: from the point
//! of view of the player who made it ("own") and from the point of view of
//! each opponent ("enemy"). Values are signed minor currency units.
//!
//! ## Pipeline per commitment part
//!
//! 1. **Score**: a hundred's score scales the base value, doubling
//!    ([`HundredRule::Multiplicative`]) or adding ([`HundredRule::Additive`])
//!    per ten points away from the hundred.
//! 2. **Boost and parity**: `2^boost`, spread over the opponents or paid solo.
//! 3. **Trump**: the better suit doubles the value.
//! 4. **Stake**: the configured multiplier.
//!
//! The sum of both parts is clamped to the ceiling.

use serde::Serialize;

use crate::errors::{ConfigError, SyntaxError, MIN_GROUP_SIZE};
use crate::options::{HundredRule, ScoringOptions};
use crate::syntax::parser::{MAX_BOOST, SCORE_RANGE};
use crate::syntax::{parse, CommitmentPart, PlayRecord};

/// Largest value a single opponent can win or lose on one play, before the
/// stake multiplier.
pub const BASE_CEILING: i64 = 15_000;

/// Which side of the table a value is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perspective {
    Own,
    Enemy,
}

/// Both values of one successfully parsed play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Score {
    pub own_value: i64,
    pub enemy_value: i64,
    pub comment: Option<String>,
}

/// Outcome of evaluating one play code. Never an error: a rejected play is
/// reported with `accepted == false` and zero values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ScoreResult {
    pub accepted: bool,
    pub own_value: i64,
    pub enemy_value: i64,
    pub comment: Option<String>,
    pub error_message: String,
    /// Human names of the base and link commitments.
    pub labels: Vec<String>,
    pub record: Option<PlayRecord>,
}

impl ScoreResult {
    fn rejected(error: SyntaxError) -> Self {
        Self {
            error_message: error.to_string(),
            ..Self::default()
        }
    }
}

/// Evaluates plays for one group size and one set of scoring options.
#[derive(Debug, Clone)]
pub struct ScoreEvaluator {
    enemy_count: i64,
    direct_payers: i64,
    options: ScoringOptions,
}

impl ScoreEvaluator {
    pub fn new(group_size: usize, options: ScoringOptions) -> Result<Self, ConfigError> {
        if group_size < MIN_GROUP_SIZE {
            return Err(ConfigError::GroupTooSmall { size: group_size });
        }
        if options.stake_multiplier == 0 {
            return Err(ConfigError::InvalidStakeMultiplier);
        }
        let enemy_count = i64::try_from(group_size - 1).unwrap_or(i64::MAX);
        Ok(Self {
            enemy_count,
            direct_payers: enemy_count - 1,
            options,
        })
    }

    /// Parse and value a play code, folding syntax errors into the result.
    pub fn evaluate(&self, code: &str) -> ScoreResult {
        match parse(code) {
            Ok(record) => {
                let score = self.score_record(&record);
                let labels = [&record.base, &record.link]
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .map(|part| part.label().to_string())
                    .collect();
                ScoreResult {
                    accepted: true,
                    own_value: score.own_value,
                    enemy_value: score.enemy_value,
                    comment: score.comment,
                    error_message: String::new(),
                    labels,
                    record: Some(record),
                }
            }
            Err(error) => ScoreResult::rejected(error),
        }
    }

    /// Parse and value a play code.
    pub fn score(&self, code: &str) -> Result<Score, SyntaxError> {
        parse(code).map(|record| self.score_record(&record))
    }

    /// Value an already parsed play. Records built by hand are held to the
    /// grammar: scores are clamped to [`SCORE_RANGE`] and boosts to
    /// [`MAX_BOOST`].
    pub fn score_record(&self, record: &PlayRecord) -> Score {
        Score {
            own_value: self.value(record, Perspective::Own),
            enemy_value: self.value(record, Perspective::Enemy),
            comment: record.comment.clone(),
        }
    }

    /// Value of a play from one perspective, clamped to the ceiling.
    pub fn value(&self, record: &PlayRecord, pov: Perspective) -> i64 {
        let total = self
            .evaluate_part(&record.base, record.trump_doubled, pov)
            .saturating_add(self.evaluate_part(&record.link, record.trump_doubled, pov));
        let ceiling = self.ceiling(pov);
        total.clamp(-ceiling, ceiling)
    }

    /// Ceiling for one perspective: the own side pays or collects from every
    /// opponent.
    pub fn ceiling(&self, pov: Perspective) -> i64 {
        let ceiling = BASE_CEILING.saturating_mul(i64::from(self.options.stake_multiplier));
        match pov {
            Perspective::Own => ceiling.saturating_mul(self.enemy_count),
            Perspective::Enemy => ceiling,
        }
    }

    fn evaluate_part(&self, part: &CommitmentPart, trump_doubled: bool, pov: Perspective) -> i64 {
        let trump = if trump_doubled { 2 } else { 1 };
        self.evaluate_score(part.base_value(), part.score)
            .saturating_mul(self.evaluate_boost(part, pov))
            .saturating_mul(trump)
            .saturating_mul(i64::from(self.options.stake_multiplier))
    }

    fn evaluate_score(&self, value: i64, score: i64) -> i64 {
        let score = score.clamp(*SCORE_RANGE.start(), *SCORE_RANGE.end());
        let factor = (if score < 100 { 100 - score } else { score - 90 }) / 10;
        match self.options.hundred_rule {
            HundredRule::Multiplicative => value.saturating_mul(1_i64 << (factor - 1).clamp(0, 62)),
            HundredRule::Additive => value.saturating_mul(factor),
        }
    }

    // Base payment: the payer settles with every opponent, less what the
    // direct payers cover themselves.
    fn evaluate_boost(&self, part: &CommitmentPart, pov: Perspective) -> i64 {
        let mut value = 1_i64 << part.boost.min(MAX_BOOST);

        if pov == Perspective::Enemy {
            if part.solo_parity {
                return 0;
            }
            value = -value;
        }

        if part.base_payment {
            value = value
                .saturating_mul(self.enemy_count)
                .saturating_sub(self.direct_payers);
        } else if pov == Perspective::Own {
            value = value.saturating_mul(self.enemy_count);
        }

        if !part.win {
            value = -value;
        }
        value
    }
}
