//! Index document lexer
//!
//! A character-level finite-state machine. [`Lexer::step`] feeds one
//! character through the transition function and returns at most one token;
//! the partial token lives in the lexer's own buffer. Offsets are character
//! indices into the whole document, a leading byte order mark included.

use tracing::trace;

use crate::errors::DocumentError;

pub const BOM: char = '\u{feff}';

/// Tokens emitted by the lexer, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Date(String),
    Place(String),
    Option { text: String, offset: usize },
    Player { name: String, offset: usize },
    Play { spec: String, start: usize },
    GroupBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Header date, up to the first space.
    Date,
    /// Header place, up to `{` or the end of the line.
    Place,
    /// Space-separated option tokens inside `{...}`.
    Options,
    /// After the option block; only spaces may follow.
    HeaderTail,
    /// Start of a body line: the player's name.
    Name,
    /// Spaces at the start of a body line. A line of only spaces is blank.
    Indent,
    /// Between play codes.
    Gap,
    /// Inside a play code.
    Play,
    /// Inside a `{...}` comment of a play code.
    Comment,
    /// Right after the `}` closing a comment.
    AfterComment,
}

#[derive(Debug)]
pub struct Lexer {
    state: State,
    buffer: String,
    start: usize,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    pub fn new() -> Self {
        Self {
            state: State::Date,
            buffer: String::new(),
            start: 0,
        }
    }

    /// Feed one character.
    pub fn step(&mut self, ch: char, offset: usize) -> Result<Option<Token>, DocumentError> {
        if ch == '\r' || (ch == BOM && offset == 0) {
            return Ok(None);
        }
        let (next, token) = self.transition(ch, offset)?;
        if let Some(token) = &token {
            trace!(?token, offset, "index token");
        }
        self.state = next;
        Ok(token)
    }

    /// Flush the pending token at the end of the document.
    pub fn finish(mut self, offset: usize) -> Result<Option<Token>, DocumentError> {
        let token = match self.state {
            State::Date if !self.buffer.is_empty() => Some(Token::Date(self.take())),
            State::Place => Some(Token::Place(self.take().trim().to_string())),
            State::Options => return Err(DocumentError::UnterminatedOptions { offset }),
            State::Name if !self.buffer.is_empty() => Some(self.player(offset)),
            State::Play | State::Comment | State::AfterComment => Some(self.play()),
            _ => None,
        };
        Ok(token)
    }

    fn transition(
        &mut self,
        ch: char,
        offset: usize,
    ) -> Result<(State, Option<Token>), DocumentError> {
        use State::*;

        let separator = ch == ' ' || ch == '\t';
        let newline = ch == '\n';

        let outcome = match self.state {
            Date if separator && self.buffer.is_empty() => (Date, None),
            Date if separator => (Place, Some(Token::Date(self.take()))),
            Date if newline => (Name, Some(Token::Date(self.take()))),
            Date => self.push(Date, ch, offset),

            Place if ch == '{' => (Options, Some(self.place())),
            Place if newline => (Name, Some(self.place())),
            Place => self.push(Place, ch, offset),

            Options if ch == '}' => (HeaderTail, self.option()),
            Options if separator => (Options, self.option()),
            Options if newline => return Err(DocumentError::UnterminatedOptions { offset }),
            Options => self.push(Options, ch, offset),

            HeaderTail if separator => (HeaderTail, None),
            HeaderTail if newline => (Name, None),
            HeaderTail => return Err(DocumentError::UnexpectedHeaderTail { found: ch, offset }),

            Name if separator && self.buffer.is_empty() => {
                self.start = offset;
                (Indent, None)
            }
            Name if separator => (Gap, Some(self.player(offset))),
            Name if newline && self.buffer.is_empty() => (Name, Some(Token::GroupBreak)),
            Name if newline => (Name, Some(self.player(offset))),
            Name => self.push(Name, ch, offset),

            Indent if separator => (Indent, None),
            Indent if newline => (Name, Some(Token::GroupBreak)),
            Indent => {
                let player = self.player(self.start);
                let next = if ch == '{' { Comment } else { Play };
                let (next, _) = self.push(next, ch, offset);
                (next, Some(player))
            }

            Gap if separator => (Gap, None),
            Gap if newline => (Name, None),
            Gap if ch == '{' => self.push(Comment, ch, offset),
            Gap => self.push(Play, ch, offset),

            Play if separator => (Gap, Some(self.play())),
            Play if newline => (Name, Some(self.play())),
            Play if ch == '{' => self.push(Comment, ch, offset),
            Play => self.push(Play, ch, offset),

            Comment if ch == '}' => self.push(AfterComment, ch, offset),
            // An unterminated comment ends its play; evaluation rejects it later.
            Comment if newline => (Name, Some(self.play())),
            Comment => self.push(Comment, ch, offset),

            AfterComment if separator => (Gap, Some(self.play())),
            AfterComment if newline => (Name, Some(self.play())),
            AfterComment => {
                return Err(DocumentError::UnexpectedCharAfterComment { found: ch, offset })
            }
        };
        Ok(outcome)
    }

    fn push(&mut self, next: State, ch: char, offset: usize) -> (State, Option<Token>) {
        if self.buffer.is_empty() {
            self.start = offset;
        }
        self.buffer.push(ch);
        (next, None)
    }

    fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    fn place(&mut self) -> Token {
        Token::Place(self.take().trim().to_string())
    }

    fn option(&mut self) -> Option<Token> {
        if self.buffer.is_empty() {
            return None;
        }
        Some(Token::Option {
            text: self.take(),
            offset: self.start,
        })
    }

    fn player(&mut self, offset: usize) -> Token {
        // An empty name is reported where its line starts.
        let offset = if self.buffer.is_empty() {
            offset
        } else {
            self.start
        };
        Token::Player {
            name: self.take(),
            offset,
        }
    }

    fn play(&mut self) -> Token {
        Token::Play {
            spec: self.take(),
            start: self.start,
        }
    }
}

/// Run the lexer over a whole document.
pub fn tokenize(text: &str) -> Result<Vec<Token>, DocumentError> {
    let mut lexer = Lexer::new();
    let mut tokens = Vec::new();
    let mut length = 0;
    for (offset, ch) in text.chars().enumerate() {
        tokens.extend(lexer.step(ch, offset)?);
        length = offset + 1;
    }
    tokens.extend(lexer.finish(length)?);
    Ok(tokens)
}
