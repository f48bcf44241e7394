//! The document-editing collaborator seam
//!
//!     The resolver never touches a document directly; it drives whatever
//!     implements [`DocumentEditor`]: a selection-oriented surface (select a
//!     range, read or replace its text) plus registries for bound fields and
//!     named sub-ranges. [`BufferEditor`] is the in-memory implementation
//!     used by the crate's own tests and by callers that only need plain
//!     text in, plain text plus records out.

use std::fmt;

use super::tags::Span;

/// Faults raised by a document editor. The core adds no retry on top; a
/// fault propagates straight out of resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// A selection range falls outside the current buffer.
    RangeOutOfBounds {
        start: usize,
        len: usize,
        buffer_len: usize,
    },
    /// A selection boundary splits a multi-byte character.
    NotCharBoundary { offset: usize },
    /// Any backend-specific fault from a non-buffer implementation.
    Backend(String),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::RangeOutOfBounds {
                start,
                len,
                buffer_len,
            } => write!(
                f,
                "selection {}+{} is outside the buffer (length {})",
                start, len, buffer_len
            ),
            EditorError::NotCharBoundary { offset } => {
                write!(f, "selection boundary at byte {} splits a character", offset)
            }
            EditorError::Backend(msg) => write!(f, "editor backend fault: {}", msg),
        }
    }
}

impl std::error::Error for EditorError {}

/// The document editor the resolver dispatches edits to.
///
/// Offsets are byte offsets into the editor's current text. Setting the
/// selection text to `""` deletes the selection; `add_field` installs a
/// bound field object at the current (collapsed) selection point.
pub trait DocumentEditor {
    /// Opaque handle for a registered-but-not-yet-installed field.
    type Field;

    /// Current buffer text.
    fn text(&self) -> String;

    /// Set the active selection.
    fn select_range(&mut self, start: usize, len: usize) -> Result<(), EditorError>;

    /// Text content of the active selection.
    fn selection_text(&self) -> String;

    /// Replace the active selection's content; `""` deletes it. The
    /// selection collapses to the end of the inserted text.
    fn set_selection_text(&mut self, text: &str) -> Result<(), EditorError>;

    /// Build a bound field object carrying the field name and its display
    /// fallback text.
    fn register_field(&mut self, name: &str, display: &str) -> Result<Self::Field, EditorError>;

    /// Install a registered field at the current selection point.
    fn add_field(&mut self, field: Self::Field) -> Result<(), EditorError>;

    /// Mark a named sub-range of the document. Coordinates follow the
    /// caller's registry convention and are recorded as given.
    fn register_sub_range(&mut self, name: &str, start: usize, len: usize)
        -> Result<(), EditorError>;
}

/// A field installed into a [`BufferEditor`], with the buffer position it
/// was inserted at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    pub name: String,
    pub display: String,
    pub position: usize,
}

/// A named sub-range registered with a [`BufferEditor`], as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubRangeRecord {
    pub name: String,
    pub start: usize,
    pub len: usize,
}

/// A registered field waiting to be installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundField {
    name: String,
    display: String,
}

/// In-memory [`DocumentEditor`] over a plain `String` buffer.
///
/// An installed field occupies its display text in the buffer flow, so
/// replacing a tag with a field whose display is the tag's own source text
/// preserves the buffer length.
#[derive(Debug, Default)]
pub struct BufferEditor {
    buffer: String,
    selection: Span,
    fields: Vec<FieldRecord>,
    sub_ranges: Vec<SubRangeRecord>,
}

impl BufferEditor {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            buffer: text.into(),
            selection: Span { start: 0, end: 0 },
            fields: Vec::new(),
            sub_ranges: Vec::new(),
        }
    }

    /// Current buffer contents.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Fields installed so far, in installation order.
    pub fn fields(&self) -> &[FieldRecord] {
        &self.fields
    }

    /// Sub-ranges registered so far, in registration order.
    pub fn sub_ranges(&self) -> &[SubRangeRecord] {
        &self.sub_ranges
    }

    fn check_range(&self, start: usize, len: usize) -> Result<(), EditorError> {
        let end = start.checked_add(len).unwrap_or(usize::MAX);
        if end > self.buffer.len() {
            return Err(EditorError::RangeOutOfBounds {
                start,
                len,
                buffer_len: self.buffer.len(),
            });
        }
        for offset in [start, end] {
            if !self.buffer.is_char_boundary(offset) {
                return Err(EditorError::NotCharBoundary { offset });
            }
        }
        Ok(())
    }
}

impl DocumentEditor for BufferEditor {
    type Field = BoundField;

    fn text(&self) -> String {
        self.buffer.clone()
    }

    fn select_range(&mut self, start: usize, len: usize) -> Result<(), EditorError> {
        self.check_range(start, len)?;
        self.selection = Span::new(start, start + len);
        Ok(())
    }

    fn selection_text(&self) -> String {
        self.buffer[self.selection.start..self.selection.end].to_string()
    }

    fn set_selection_text(&mut self, text: &str) -> Result<(), EditorError> {
        self.buffer
            .replace_range(self.selection.start..self.selection.end, text);
        let collapse = self.selection.start + text.len();
        self.selection = Span::new(collapse, collapse);
        Ok(())
    }

    fn register_field(&mut self, name: &str, display: &str) -> Result<BoundField, EditorError> {
        Ok(BoundField {
            name: name.to_string(),
            display: display.to_string(),
        })
    }

    fn add_field(&mut self, field: BoundField) -> Result<(), EditorError> {
        let position = self.selection.start;
        self.buffer.insert_str(position, &field.display);
        let collapse = position + field.display.len();
        self.selection = Span::new(collapse, collapse);
        self.fields.push(FieldRecord {
            name: field.name,
            display: field.display,
            position,
        });
        Ok(())
    }

    fn register_sub_range(
        &mut self,
        name: &str,
        start: usize,
        len: usize,
    ) -> Result<(), EditorError> {
        self.sub_ranges.push(SubRangeRecord {
            name: name.to_string(),
            start,
            len,
        });
        Ok(())
    }
}
