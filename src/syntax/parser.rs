//! Play Code Parser
//!
//! Converts one play code (for example `$:-3k70-s*{tahle sedla!}`) into a
//! [`PlayRecord`]. The parser is purely syntactic: values are computed by the
//! evaluator. Every rule consumes a prefix of the remaining text, so a
//! [`Cursor`] over the code is all the state it needs.

use crate::errors::SyntaxError;
use crate::syntax::{CommitmentPart, Contract, PlayRecord};

/// Accepted range of a hundred's score.
pub const SCORE_RANGE: std::ops::RangeInclusive<i64> = -100..=190;

/// Largest boost digit a commitment can carry.
pub const MAX_BOOST: u8 = 4;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parse a play code into a play record.
pub fn parse(code: &str) -> Result<PlayRecord, SyntaxError> {
    let (body, comment) = split_comment(code.trim());

    if let Some(contract) = literal(body) {
        return Ok(PlayRecord {
            base: CommitmentPart::literal(contract),
            comment,
            ..PlayRecord::default()
        });
    }

    let mut cursor = Cursor::new(body);
    let mut record = parse_commitments(&mut cursor)?;

    if cursor.eat("*") {
        if !record.base.contract.is_some_and(Contract::allows_trump) {
            return Err(SyntaxError::TrumpIncompatible);
        }
        record.trump_doubled = true;
    }

    if !cursor.is_empty() {
        return Err(SyntaxError::TrailingGarbage);
    }

    if record.base.base_value() == 0 {
        return Err(SyntaxError::MissingBaseCommitment);
    }

    if record.link.solo_parity && record.link.base_value() == 0 {
        return Err(SyntaxError::IncompleteLinkCommitment);
    }

    record.comment = comment;
    Ok(record)
}

/// Split a trailing `{comment}` off a play code.
///
/// The comment starts at the first `{` after the last `}` that precedes the
/// closing brace, so `e{{x}` carries the comment `{x`.
pub fn split_comment(code: &str) -> (&str, Option<String>) {
    let Some(inner) = code.strip_suffix('}') else {
        return (code, None);
    };
    let tail_start = inner.rfind('}').map_or(0, |pos| pos + 1);
    match inner[tail_start..].find('{') {
        Some(open) => {
            let open = tail_start + open;
            (&inner[..open], Some(inner[open + 1..].to_string()))
        }
        None => (code, None),
    }
}

// ============================================================================
// GRAMMAR RULES
// ============================================================================

fn literal(body: &str) -> Option<Contract> {
    match body {
        "e" => Some(Contract::Fold),
        "r1" => Some(Contract::MinorFault),
        "r2" => Some(Contract::MajorFault),
        _ => None,
    }
}

fn parse_commitments(cursor: &mut Cursor<'_>) -> Result<PlayRecord, SyntaxError> {
    let mut base = cursor.parity()?;
    base.win = cursor.sign().ok_or(SyntaxError::MissingSign)?;
    base.boost = cursor.boost();

    let mut link = CommitmentPart::default();

    if cursor.eat("s") {
        base.contract = Some(Contract::Seven);
        link = parse_seven_link(cursor)?;
    } else if cursor.eat("k") {
        base.contract = Some(Contract::Hundred);
        base.score = cursor.score()?;
        link = parse_hundred_link(cursor)?;
    } else if cursor.eat("c") {
        base.contract = Some(Contract::Betl);
    } else if cursor.eat("d") {
        base.contract = Some(Contract::Durch);
    } else if cursor.eat("mc") {
        base.contract = Some(Contract::MajklBetl);
    } else if cursor.eat("msc") {
        base.contract = Some(Contract::MajklSuperBetl);
    } else if cursor.eat("v") {
        base.contract = Some(Contract::TwoSevens);
        link = parse_two_sevens_link(cursor)?;
    } else {
        return Err(SyntaxError::UnknownBaseCommitment);
    }

    Ok(PlayRecord {
        base,
        link,
        ..PlayRecord::default()
    })
}

/// A seven is always played together with the game or a silent hundred.
fn parse_seven_link(cursor: &mut Cursor<'_>) -> Result<CommitmentPart, SyntaxError> {
    let mut link = cursor.parity()?;
    link.win = cursor.sign().ok_or(SyntaxError::MissingGameAfterSeven)?;
    link.boost = cursor.boost();

    if cursor.eat("h") {
        link.contract = Some(Contract::Game);
    } else if cursor.eat("t") {
        link.contract = Some(Contract::SilentHundred);
        link.score = cursor.score()?;
    } else {
        return Err(SyntaxError::MissingGameAfterSeven);
    }
    Ok(link)
}

fn parse_hundred_link(cursor: &mut Cursor<'_>) -> Result<CommitmentPart, SyntaxError> {
    let mut link = cursor.parity()?;
    let Some(win) = cursor.sign() else {
        return Ok(link);
    };
    link.win = win;

    if cursor.eat("n") {
        link.contract = Some(Contract::SilentSeven);
        return Ok(link);
    }

    link.boost = cursor.boost();
    if !cursor.eat("s") {
        return Err(SyntaxError::UnknownCommitmentAfterHundred);
    }
    link.contract = Some(Contract::Seven);
    Ok(link)
}

fn parse_two_sevens_link(cursor: &mut Cursor<'_>) -> Result<CommitmentPart, SyntaxError> {
    let mut link = cursor.parity()?;
    let Some(win) = cursor.sign() else {
        return Ok(link);
    };
    link.win = win;
    link.boost = cursor.boost();

    if !cursor.eat("k") {
        return Err(SyntaxError::MissingHundredAfterTwoSevens);
    }
    link.contract = Some(Contract::Hundred);
    link.score = cursor.score()?;
    Ok(link)
}

// ============================================================================
// CURSOR
// ============================================================================

/// Remaining unparsed text of a play code.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    fn eat(&mut self, prefix: &str) -> bool {
        match self.rest.strip_prefix(prefix) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    /// `$` marks solo parity, a following `:` marks base payment.
    fn parity(&mut self) -> Result<CommitmentPart, SyntaxError> {
        let solo_parity = self.eat("$");
        let base_payment = self.eat(":");
        if base_payment && !solo_parity {
            return Err(SyntaxError::BasePaymentWithoutSoloParity);
        }
        Ok(CommitmentPart {
            solo_parity,
            base_payment,
            ..CommitmentPart::default()
        })
    }

    /// `Some(true)` for `+`, `Some(false)` for `-`.
    fn sign(&mut self) -> Option<bool> {
        if self.eat("+") {
            Some(true)
        } else if self.eat("-") {
            Some(false)
        } else {
            None
        }
    }

    fn boost(&mut self) -> u8 {
        match self.rest.as_bytes().first().copied() {
            Some(digit @ b'1'..=b'9') if digit - b'0' <= MAX_BOOST => {
                self.rest = &self.rest[1..];
                digit - b'0'
            }
            _ => 0,
        }
    }

    fn score(&mut self) -> Result<i64, SyntaxError> {
        let sign = if self.eat("-") { -1 } else { 1 };
        let digits = self
            .rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.rest.len());
        if digits == 0 {
            return Err(SyntaxError::MissingScore);
        }

        let (number, rest) = self.rest.split_at(digits);
        let score = number
            .parse::<i64>()
            .map(|value| sign * value)
            .map_err(|_| SyntaxError::ScoreOutOfRange)?;
        if !SCORE_RANGE.contains(&score) {
            return Err(SyntaxError::ScoreOutOfRange);
        }
        if score % 10 != 0 {
            return Err(SyntaxError::ScoreNotMultipleOfTen);
        }

        self.rest = rest;
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_plays() {
        let record = parse("r1").unwrap();
        assert_eq!(record.base.contract, Some(Contract::MinorFault));
        assert!(record.link.is_empty());
        assert!(!record.base.win);
    }

    #[test]
    fn test_literal_with_comment() {
        let record = parse("e{}").unwrap();
        assert_eq!(record.base.contract, Some(Contract::Fold));
        assert_eq!(record.comment.as_deref(), Some(""));
    }

    #[test]
    fn test_split_comment_takes_first_brace_of_last_span() {
        assert_eq!(split_comment("e{{c}"), ("e", Some("{c".to_string())));
        assert_eq!(split_comment("e{}c}"), ("e{}c}", None));
        assert_eq!(split_comment("+c"), ("+c", None));
    }

    #[test]
    fn test_hundred_with_seven_link() {
        let record = parse("$:-3k70-s*").unwrap();
        assert!(record.base.base_payment);
        assert_eq!(record.base.boost, 3);
        assert_eq!(record.base.score, 70);
        assert_eq!(record.link.contract, Some(Contract::Seven));
        assert!(!record.link.win);
        assert!(record.trump_doubled);
    }

    #[test]
    fn test_multi_letter_keywords() {
        assert_eq!(
            parse("-msc").unwrap().base.contract,
            Some(Contract::MajklSuperBetl)
        );
        assert_eq!(parse("+mc").unwrap().base.contract, Some(Contract::MajklBetl));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse("k130+s*"), Err(SyntaxError::MissingSign));
        assert_eq!(parse(":+c"), Err(SyntaxError::BasePaymentWithoutSoloParity));
        assert_eq!(parse("-h+2s"), Err(SyntaxError::UnknownBaseCommitment));
        assert_eq!(parse("+s"), Err(SyntaxError::MissingGameAfterSeven));
        assert_eq!(parse("+s-x"), Err(SyntaxError::MissingGameAfterSeven));
        assert_eq!(parse("+k100-1n"), Err(SyntaxError::UnknownCommitmentAfterHundred));
        assert_eq!(parse("+v+s"), Err(SyntaxError::MissingHundredAfterTwoSevens));
        assert_eq!(parse("+k"), Err(SyntaxError::MissingScore));
        assert_eq!(parse("+k-"), Err(SyntaxError::MissingScore));
        assert_eq!(parse("+k200"), Err(SyntaxError::ScoreOutOfRange));
        assert_eq!(parse("+k105"), Err(SyntaxError::ScoreNotMultipleOfTen));
        assert_eq!(parse("+c*"), Err(SyntaxError::TrumpIncompatible));
        assert_eq!(parse("+c$"), Err(SyntaxError::TrailingGarbage));
        assert_eq!(parse("+k100$"), Err(SyntaxError::IncompleteLinkCommitment));
        assert_eq!(parse("e1"), Err(SyntaxError::MissingSign));
    }

    #[test]
    fn test_huge_score_is_out_of_range() {
        assert_eq!(
            parse("+k99999999999999999999999"),
            Err(SyntaxError::ScoreOutOfRange)
        );
    }
}
