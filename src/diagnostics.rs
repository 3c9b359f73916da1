//! Diagnostic rendering for index documents
//!
//! [`IndexDiagnostic`] pairs a [`DocumentError`] with the text it came from
//! so `miette` can render the offending play or header with a label under
//! it. Document errors count characters; miette counts bytes, so spans are
//! converted on the way out.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};

use crate::errors::DocumentError;
use crate::syntax::Span;

pub type SourceArc = Arc<NamedSource<String>>;

/// A document error together with its named source.
#[derive(Debug, Clone)]
pub struct IndexDiagnostic {
    error: DocumentError,
    source: SourceArc,
}

impl IndexDiagnostic {
    pub fn new(error: DocumentError, name: impl AsRef<str>, text: impl Into<String>) -> Self {
        Self {
            error,
            source: Arc::new(NamedSource::new(name, text.into())),
        }
    }

    /// Byte range of the error's span in the source text.
    pub fn byte_span(&self) -> Option<(usize, usize)> {
        self.error.span().map(|span| to_byte_span(self.source.inner(), span))
    }

    fn label(&self) -> String {
        match &self.error {
            DocumentError::InvalidPlay { source, .. } => source.to_string(),
            DocumentError::UnknownIndexOption { .. } => "unknown option".to_string(),
            DocumentError::DuplicatePlayer { .. } => "listed again here".to_string(),
            DocumentError::GroupTooSmall { .. } => "group starts here".to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for IndexDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl Error for IndexDiagnostic {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.error.source()
    }
}

impl Diagnostic for IndexDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.error {
            DocumentError::InvalidPlay { source, .. } => format!("marias::play::{}", source.code()),
            other => format!("marias::index::{}", other.code()),
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.error
            .help()
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(self.source.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let (start, len) = self.byte_span()?;
        let label = LabeledSpan::new(Some(self.label()), start, len);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Convert a character span into a byte `(offset, length)` pair, clamped to
/// the text. Empty spans are widened to one character.
pub fn to_byte_span(text: &str, span: Span) -> (usize, usize) {
    let byte_at = |chars: usize| {
        text.char_indices()
            .nth(chars)
            .map_or(text.len(), |(byte, _)| byte)
    };
    let start = byte_at(span.start);
    let end = byte_at(span.end.max(span.start + 1));
    (start, end.saturating_sub(start))
}
