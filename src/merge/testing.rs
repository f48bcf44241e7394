//! Testing utilities for tag assertions
//!
//!     Scan results are position-heavy, and ad-hoc index poking in tests
//!     obscures what is actually being claimed. `assert_tags` captures a
//!     buffer's full [`TagSnapshot`] and exposes fluent assertions over it,
//!     so a test reads as one chained statement about the buffer:
//!
//!     ```rust,ignore
//!     assert_tags("Hello {{ name }}!")
//!         .field_count(1)
//!         .field(0, "name", 6, 16)
//!         .directive_count(0);
//!     ```
//!
//!     Every assertion panics with the failing buffer's snapshot attached,
//!     which beats re-running the scan by hand to see what was found.

use super::snapshot::TagSnapshot;

/// Capture `text` and return fluent assertions over the result.
pub fn assert_tags(text: &str) -> TagAssertions {
    TagAssertions {
        snapshot: TagSnapshot::capture(text),
    }
}

/// Fluent assertions over one buffer's scan results.
pub struct TagAssertions {
    snapshot: TagSnapshot,
}

impl TagAssertions {
    pub fn field_count(self, expected: usize) -> Self {
        assert_eq!(
            self.snapshot.fields.len(),
            expected,
            "expected {} field tags, found {}: {:#?}",
            expected,
            self.snapshot.fields.len(),
            self.snapshot.fields
        );
        self
    }

    pub fn field(self, index: usize, name: &str, start: usize, end: usize) -> Self {
        let tag = &self.snapshot.fields[index];
        assert_eq!(tag.name, name, "field {} name mismatch: {:#?}", index, tag);
        assert_eq!(
            (tag.span.start, tag.span.end),
            (start, end),
            "field {} span mismatch: {:#?}",
            index,
            tag
        );
        self
    }

    pub fn block_count(self, expected: usize) -> Self {
        assert_eq!(
            self.snapshot.blocks.len(),
            expected,
            "expected {} block spans, found {}: {:#?}",
            expected,
            self.snapshot.blocks.len(),
            self.snapshot.blocks
        );
        self
    }

    pub fn block(self, index: usize, name: &str, start: usize, end: usize) -> Self {
        let block = &self.snapshot.blocks[index];
        assert_eq!(block.name, name, "block {} name mismatch: {:#?}", index, block);
        assert_eq!(
            (block.span.start, block.span.end),
            (start, end),
            "block {} span mismatch: {:#?}",
            index,
            block
        );
        self
    }

    pub fn directive_count(self, expected: usize) -> Self {
        assert_eq!(
            self.snapshot.directives.len(),
            expected,
            "expected {} directives, found {}: {:#?}",
            expected,
            self.snapshot.directives.len(),
            self.snapshot.directives
        );
        self
    }

    /// Access the underlying snapshot for assertions the builder lacks.
    pub fn snapshot(&self) -> &TagSnapshot {
        &self.snapshot
    }
}
