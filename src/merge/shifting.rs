//! Offset shifting - mapping snapshot offsets onto a shrinking buffer
//!
//!     Every span is computed once, against the original snapshot. The live
//!     buffer then shrinks (or grows) as edits are applied left-to-right, so
//!     later edits must subtract everything earlier edits removed. That drift
//!     is carried as one explicit signed accumulator instead of re-reading
//!     the mutated buffer, which keeps the arithmetic testable without any
//!     document collaborator involved.

use super::tags::Span;

/// Cumulative-shrink accumulator for edits applied strictly left-to-right.
///
/// Preconditions, asserted because violating them is a logic defect and not
/// a runtime condition: edits arrive in non-decreasing original-start order
/// and never overlap in original coordinates.
#[derive(Debug, Default)]
pub struct OffsetTracker {
    /// Net bytes removed so far (negative when insertions outgrow removals).
    shift: isize,
    /// End of the last applied edit, in original coordinates.
    watermark: usize,
}

impl OffsetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map an original-snapshot offset onto the live buffer without
    /// consuming an edit.
    pub fn shifted(&self, offset: usize) -> usize {
        let effective = offset as isize - self.shift;
        assert!(
            effective >= 0,
            "offset {} precedes text already removed (shift {})",
            offset,
            self.shift
        );
        effective as usize
    }

    /// Consume one edit: returns the effective start to apply against the
    /// live buffer, then folds the edit's net length change into the shift.
    pub fn apply(&mut self, span: Span, replacement_len: usize) -> usize {
        assert!(
            span.start >= self.watermark,
            "edit at {} arrived out of order (previous edit ended at {})",
            span.start,
            self.watermark
        );
        let effective = self.shifted(span.start);
        self.watermark = span.end;
        self.shift += span.len() as isize - replacement_len as isize;
        effective
    }
}
