//! Tournament index documents
//!
//! An index records one evening of play:
//!
//! ```text
//! 2024-03-14 U Fleků {hundred=add multiplier=2}
//! Pepa +k100 e
//! Franta $:-c
//! Jarda
//!
//! Pepa -s-h
//! ...
//! ```
//!
//! The first line holds the date, the place and optional scoring options.
//! Every further line is a player followed by the play codes they made; a
//! blank line separates groups. [`read`] runs the [`lexer`] over the text,
//! folds its tokens into an [`IndexDocument`] and validates the result.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::DocumentError;
use crate::options::ScoringOptions;
use crate::syntax::Span;

pub mod lexer;
pub mod validate;

use lexer::Token;

/// Date formats accepted in the header, tried in order.
pub const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%Y/%m/%d"];

// ============================================================================
// DOCUMENT TREE
// ============================================================================

/// One play code as written in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub spec: String,
    /// Character offset of the first character of the play.
    pub start: usize,
}

impl Play {
    pub fn new(spec: impl Into<String>, start: usize) -> Self {
        Self {
            spec: spec.into(),
            start,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.start + self.spec.chars().count())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// Character offset of the player's name.
    pub start: usize,
    pub plays: Vec<Play>,
}

impl Player {
    pub fn new(name: impl Into<String>, start: usize) -> Self {
        Self {
            name: name.into(),
            start,
            plays: Vec::new(),
        }
    }

    pub fn with_plays<I, S>(name: impl Into<String>, plays: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut player = Self::new(name, 0);
        player.plays = plays.into_iter().map(|spec| Play::new(spec, 0)).collect();
        player
    }
}

/// Players who sat at one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Group {
    pub players: Vec<Player>,
}

impl Group {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.name == name)
    }
}

/// A raw `{...}` token from the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionToken {
    pub text: String,
    pub offset: usize,
}

/// A parsed tournament index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IndexDocument {
    /// `None` when the header date could not be parsed.
    pub date: Option<NaiveDate>,
    pub raw_date: String,
    pub place: String,
    pub options: Vec<OptionToken>,
    pub scoring: ScoringOptions,
    pub groups: Vec<Group>,
}

impl IndexDocument {
    pub fn is_empty(&self) -> bool {
        self.raw_date.is_empty() && self.place.is_empty() && self.groups.is_empty()
    }

    /// Names of all players in order of first appearance.
    pub fn player_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for player in self.groups.iter().flat_map(|group| &group.players) {
            if !names.contains(&player.name.as_str()) {
                names.push(&player.name);
            }
        }
        names
    }

    pub fn play_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|group| &group.players)
            .map(|player| player.plays.len())
            .sum()
    }
}

impl FromStr for IndexDocument {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        read(s)
    }
}

// ============================================================================
// READER
// ============================================================================

/// Read and validate an index document.
///
/// A blank document is an empty index. Otherwise the first error wins.
pub fn read(text: &str) -> Result<IndexDocument, DocumentError> {
    if text.trim_start_matches(lexer::BOM).trim().is_empty() {
        return Ok(IndexDocument::default());
    }

    let mut document = scan(text)?;
    document.scoring = ScoringOptions::from_tokens(
        document
            .options
            .iter()
            .map(|token| (token.text.as_str(), token.offset)),
    )?;
    validate::validate(&document)?;

    debug!(
        place = %document.place,
        groups = document.groups.len(),
        plays = document.play_count(),
        "read index document"
    );
    Ok(document)
}

/// Run the lexer over the text and build the document tree, without
/// validation.
pub fn scan(text: &str) -> Result<IndexDocument, DocumentError> {
    let mut builder = DocumentBuilder::default();
    for token in lexer::tokenize(text)? {
        builder.apply(token);
    }
    Ok(builder.finish())
}

/// Parse a header date in any of the [`DATE_FORMATS`].
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// Folds lexer tokens into the document tree.
#[derive(Debug, Default)]
struct DocumentBuilder {
    document: IndexDocument,
    group: Option<Group>,
}

impl DocumentBuilder {
    fn apply(&mut self, token: Token) {
        match token {
            Token::Date(raw) => {
                self.document.date = parse_date(&raw);
                self.document.raw_date = raw;
            }
            Token::Place(place) => self.document.place = place,
            Token::Option { text, offset } => {
                self.document.options.push(OptionToken { text, offset })
            }
            Token::Player { name, offset } => self
                .group
                .get_or_insert_with(Group::default)
                .players
                .push(Player::new(name, offset)),
            Token::Play { spec, start } => {
                // The lexer only emits plays after a player name.
                if let Some(player) = self
                    .group
                    .as_mut()
                    .and_then(|group| group.players.last_mut())
                {
                    player.plays.push(Play::new(spec, start));
                }
            }
            Token::GroupBreak => self.close_group(),
        }
    }

    fn close_group(&mut self) {
        if let Some(group) = self.group.take() {
            self.document.groups.push(group);
        }
    }

    fn finish(mut self) -> IndexDocument {
        self.close_group();
        self.document
    }
}
