//! Marias error taxonomy
//!
//! Four families of errors, one per stage of the pipeline:
//!
//! - [`SyntaxError`]: a play code does not follow the grammar
//! - [`ConfigError`]: scoring cannot be configured as requested
//! - [`DocumentError`]: an index document is malformed or fails validation
//! - [`BalanceError`]: an aggregation invariant was violated (a logic bug,
//!   never bad user input)
//!
//! Malformed play codes are an expected outcome and travel as values; none of
//! these errors are raised by panicking.

use thiserror::Error;

use crate::syntax::Span;

/// Smallest group that can play a round.
pub const MIN_GROUP_SIZE: usize = 3;

// ============================================================================
// PLAY CODE ERRORS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("missing plus or minus sign of the base commitment")]
    MissingSign,
    #[error("unknown base commitment")]
    UnknownBaseCommitment,
    #[error("missing score of the hundred")]
    MissingScore,
    #[error("score of the hundred is outside the range [-100;190]")]
    ScoreOutOfRange,
    #[error("score of the hundred is not a multiple of 10")]
    ScoreNotMultipleOfTen,
    #[error("unexpected characters at the end of the play")]
    TrailingGarbage,
    #[error("link commitment is incomplete")]
    IncompleteLinkCommitment,
    #[error("commitment cannot be played in the better suit")]
    TrumpIncompatible,
    #[error("base payment without solo parity")]
    BasePaymentWithoutSoloParity,
    #[error("missing game commitment after the seven")]
    MissingGameAfterSeven,
    #[error("unknown commitment after the hundred")]
    UnknownCommitmentAfterHundred,
    #[error("expected a hundred after two sevens")]
    MissingHundredAfterTwoSevens,
    #[error("missing base commitment")]
    MissingBaseCommitment,
}

impl SyntaxError {
    /// Stable diagnostic code suffix.
    pub fn code(&self) -> &'static str {
        match self {
            SyntaxError::MissingSign => "missing_sign",
            SyntaxError::UnknownBaseCommitment => "unknown_base_commitment",
            SyntaxError::MissingScore => "missing_score",
            SyntaxError::ScoreOutOfRange => "score_out_of_range",
            SyntaxError::ScoreNotMultipleOfTen => "score_not_multiple_of_ten",
            SyntaxError::TrailingGarbage => "trailing_garbage",
            SyntaxError::IncompleteLinkCommitment => "incomplete_link_commitment",
            SyntaxError::TrumpIncompatible => "trump_incompatible",
            SyntaxError::BasePaymentWithoutSoloParity => "base_payment_without_solo_parity",
            SyntaxError::MissingGameAfterSeven => "missing_game_after_seven",
            SyntaxError::UnknownCommitmentAfterHundred => "unknown_commitment_after_hundred",
            SyntaxError::MissingHundredAfterTwoSevens => "missing_hundred_after_two_sevens",
            SyntaxError::MissingBaseCommitment => "missing_base_commitment",
        }
    }
}

// ============================================================================
// CONFIGURATION ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("group size {size} is smaller than {}", MIN_GROUP_SIZE)]
    GroupTooSmall { size: usize },
    #[error("unsupported hundred rule `{0}`")]
    UnsupportedHundredRule(String),
    #[error("stake multiplier must be a positive integer")]
    InvalidStakeMultiplier,
}

// ============================================================================
// INDEX DOCUMENT ERRORS
// ============================================================================

/// Errors raised while reading an index document.
///
/// Offsets and spans count characters from the start of the document. Group
/// and play numbers are 1-based, as shown to the author.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("unexpected character {found:?} after the header options")]
    UnexpectedHeaderTail { found: char, offset: usize },
    #[error("option block of the header is not closed")]
    UnterminatedOptions { offset: usize },
    #[error("unexpected character {found:?} after a play comment")]
    UnexpectedCharAfterComment { found: char, offset: usize },
    #[error("unknown index option `{option}`")]
    UnknownIndexOption { option: String, offset: usize },
    #[error("place of the index is empty")]
    EmptyPlace,
    #[error("`{raw}` is not a valid index date")]
    InvalidDate { raw: String },
    #[error("group {group} has {players} players, at least {} are required", MIN_GROUP_SIZE)]
    GroupTooSmall {
        group: usize,
        players: usize,
        offset: usize,
    },
    #[error("group {group} contains a player without a name")]
    EmptyPlayerName { group: usize, offset: usize },
    #[error("player `{name}` appears more than once in group {group}")]
    DuplicatePlayer {
        group: usize,
        name: String,
        offset: usize,
    },
    #[error("group {group} cannot be scored")]
    Config {
        group: usize,
        #[source]
        source: ConfigError,
    },
    #[error("play {play} of player `{player}` in group {group} is invalid: {source}")]
    InvalidPlay {
        group: usize,
        player: String,
        play: usize,
        span: Span,
        #[source]
        source: SyntaxError,
    },
}

impl DocumentError {
    /// Stable diagnostic code suffix.
    pub fn code(&self) -> &'static str {
        match self {
            DocumentError::UnexpectedHeaderTail { .. } => "unexpected_header_tail",
            DocumentError::UnterminatedOptions { .. } => "unterminated_options",
            DocumentError::UnexpectedCharAfterComment { .. } => "unexpected_char_after_comment",
            DocumentError::UnknownIndexOption { .. } => "unknown_index_option",
            DocumentError::EmptyPlace => "empty_place",
            DocumentError::InvalidDate { .. } => "invalid_date",
            DocumentError::GroupTooSmall { .. } => "group_too_small",
            DocumentError::EmptyPlayerName { .. } => "empty_player_name",
            DocumentError::DuplicatePlayer { .. } => "duplicate_player",
            DocumentError::Config { .. } => "config",
            DocumentError::InvalidPlay { .. } => "invalid_play",
        }
    }

    /// Location of the error in the document, if it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            DocumentError::UnexpectedHeaderTail { offset, .. }
            | DocumentError::UnterminatedOptions { offset }
            | DocumentError::UnexpectedCharAfterComment { offset, .. }
            | DocumentError::GroupTooSmall { offset, .. }
            | DocumentError::EmptyPlayerName { offset, .. } => {
                Some(Span::new(*offset, offset + 1))
            }
            DocumentError::UnknownIndexOption { option, offset } => {
                Some(Span::new(*offset, offset + option.chars().count()))
            }
            DocumentError::DuplicatePlayer { name, offset, .. } => {
                Some(Span::new(*offset, offset + name.chars().count().max(1)))
            }
            DocumentError::InvalidPlay { span, .. } => Some(*span),
            DocumentError::EmptyPlace
            | DocumentError::InvalidDate { .. }
            | DocumentError::Config { .. } => None,
        }
    }

    /// A hint for the author of the document.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            DocumentError::UnknownIndexOption { .. } => {
                Some("supported options are hundred=add, hundred=mult and multiplier=1|2|10")
            }
            DocumentError::InvalidDate { .. } => {
                Some("write the date as YYYY-MM-DD or D.M.YYYY")
            }
            DocumentError::UnexpectedCharAfterComment { .. } => {
                Some("a comment must end its play; separate plays with a space")
            }
            DocumentError::EmptyPlace => Some("put the place after the date on the first line"),
            DocumentError::GroupTooSmall { .. } => {
                Some("groups are separated by blank lines; check for a stray empty line")
            }
            _ => None,
        }
    }
}

// ============================================================================
// BALANCE INVARIANT ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    #[error("group balance sums to {total} instead of zero")]
    GroupBalanceNotZero { total: i64 },
    #[error("play `{play}` of player `{player}` cannot be scored")]
    UnscorablePlay {
        player: String,
        play: String,
        #[source]
        source: SyntaxError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_play_message_includes_cause() {
        let err = DocumentError::InvalidPlay {
            group: 2,
            player: "Pepa".to_string(),
            play: 3,
            span: Span::new(10, 14),
            source: SyntaxError::MissingSign,
        };
        let msg = err.to_string();
        assert!(msg.contains("group 2"));
        assert!(msg.contains("Pepa"));
        assert!(msg.contains("plus or minus"));
        assert_eq!(err.span(), Some(Span::new(10, 14)));
    }

    #[test]
    fn test_codes_are_snake_case() {
        assert_eq!(SyntaxError::ScoreOutOfRange.code(), "score_out_of_range");
        assert_eq!(DocumentError::EmptyPlace.code(), "empty_place");
    }
}
