//! Tag entities produced by scanning and matching
//!
//!     Every tag the scanners discover is carried as a span into the original
//!     snapshot text plus whatever the grammar extracted from the tag body.
//!     The entities are transient: constructed once per scan, consumed by the
//!     resolver, and discarded after the corresponding edit is issued.
//!
//!     Offsets are byte offsets into the snapshot. Spans are half-open
//!     (`start..end`); the one exception to "span == exact tag extent" is
//!     [`BlockSpan`], which carries the one-past-brace convention its
//!     consumer's sub-range registry expects (see [`crate::merge::matching`]).

use std::fmt;

/// A half-open byte range into the snapshot text at the time of discovery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a span. `start <= end` is an invariant of every span the
    /// scanners produce; violating it here is a programming error.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "span start {} exceeds end {}", start, end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Extract the spanned source text from the snapshot it was computed on.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// One `{{name}}` occurrence.
///
/// `name` is the tag body with every whitespace character removed (so
/// `{{ first name }}` yields `firstname`). The field grammar excludes `#`
/// and `/` as the first body character, so a name never starts with either.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldTag {
    pub span: Span,
    pub name: String,
}

/// Whether a block delimiter opens or closes a repeating region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DelimiterKind {
    Open,
    Close,
}

/// One `{{#foreach x}}` or `{{/foreach x}}` occurrence.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BlockDelimiter {
    pub span: Span,
    pub kind: DelimiterKind,
    pub variable: String,
}

/// A matched, well-nested open/close pair with equal variable name.
///
/// The span runs from one past the opening delimiter's first brace through
/// one past the closing delimiter's end.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BlockSpan {
    pub span: Span,
    pub name: String,
}

/// Any `{{#...}}` or `{{/...}}` occurrence, matched or not.
///
/// Used purely as "markup to delete once fields and blocks are resolved";
/// no body content is extracted.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenericDirective {
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len_and_slice() {
        let span = Span::new(6, 16);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
        assert_eq!(span.slice("Hello {{ name }}!"), "{{ name }}");
    }

    #[test]
    #[should_panic(expected = "span start")]
    fn test_inverted_span_is_rejected() {
        Span::new(4, 2);
    }
}
