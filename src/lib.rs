//! # mergemark
//!
//! Locates mustache-style merge markup inside a plain-text rendering of a
//! larger document and converts it into position-annotated edits that a
//! downstream document editor can act on: insert a data-bound field for
//! `{{name}}`, mark a repeating region for `{{#foreach x}}...{{/foreach x}}`,
//! and delete any leftover `{{#...}}`/`{{/...}}` directive markup.
//!
//! The pipeline is three independent scans over one immutable snapshot,
//! followed by stack-based pairing of block delimiters and a fixed-order
//! dispatch of edits to a [`DocumentEditor`](merge::editor::DocumentEditor)
//! collaborator:
//!
//! ```rust,ignore
//! use mergemark::{resolve, BufferEditor};
//!
//! let mut editor = BufferEditor::new("Dear {{ name }},\n{{#foreach item}}...{{/foreach item}}");
//! let outcome = resolve(&mut editor).unwrap();
//! assert_eq!(outcome.fields, 1);
//! assert_eq!(outcome.blocks, 1);
//! ```
//!
//! See the [testing module](merge::testing) for the assertion helper the
//! crate's own tests are written against.

pub mod merge;

pub use merge::editor::{BufferEditor, DocumentEditor, EditorError};
pub use merge::matching::match_blocks;
pub use merge::resolving::{resolve, resolve_with, ResolveOptions, ResolveOutcome, ShiftPolicy};
pub use merge::scanning::{
    normalize_newlines, scan_block_delimiters, scan_directives, scan_fields,
};
pub use merge::shifting::OffsetTracker;
pub use merge::snapshot::TagSnapshot;
pub use merge::tags::{BlockDelimiter, BlockSpan, DelimiterKind, FieldTag, GenericDirective, Span};
