//! Block matching - stack-based pairing of foreach delimiters
//!
//!     Delimiters arrive in left-to-right discovery order and are paired with
//!     plain LIFO discipline: an open pushes, a close pops the nearest
//!     unresolved open. A pair is emitted only when the two variable names
//!     agree; a name mismatch discards the popped open and emits nothing, a
//!     close against an empty stack is ignored, and opens still on the stack
//!     at the end are dropped. Malformed structure is never an error - it
//!     simply produces no span.
//!
//!     LIFO pairing supports nesting of distinct variables. It does NOT pair
//!     overlapping (non-nested) same-named blocks in any smarter way - that
//!     is the stated limit of the algorithm, not a defect.

use super::tags::{BlockDelimiter, BlockSpan, DelimiterKind, Span};

/// Pair open/close delimiters into named block spans, sorted ascending by
/// start.
///
/// The emitted span runs from one past the opening delimiter's first brace
/// through one past the closing delimiter's end - the coordinate convention
/// the sub-range registry consumes.
pub fn match_blocks(delimiters: &[BlockDelimiter]) -> Vec<BlockSpan> {
    let mut stack: Vec<&BlockDelimiter> = Vec::new();
    let mut blocks = Vec::new();

    for delimiter in delimiters {
        match delimiter.kind {
            DelimiterKind::Open => stack.push(delimiter),
            DelimiterKind::Close => {
                if let Some(open) = stack.pop() {
                    if open.variable == delimiter.variable {
                        blocks.push(BlockSpan {
                            span: Span::new(open.span.start + 1, delimiter.span.end + 1),
                            name: open.variable.clone(),
                        });
                    }
                }
            }
        }
    }

    // Pop order is innermost-first, which is not start-ascending for nested
    // shapes; consumers require ascending starts.
    blocks.sort_by_key(|block| block.span.start);
    blocks
}
