//! Resolution - fixed-order dispatch of discovered markup to the editor
//!
//!     One resolve call takes a single newline-normalized snapshot of the
//!     editor's text and works through the markup in a fixed order:
//!
//!         1. Field tags: each `{{name}}` is selected, read back, replaced
//!            with a bound field carrying the name and the tag's own source
//!            text as its display fallback.
//!         2. Block spans: each matched `foreach` pair is registered as a
//!            named sub-range (prefix + variable name).
//!         3. Generic directives: every `{{#...}}`/`{{/...}}` occurrence is
//!            deleted, with deletion offsets run through an
//!            [`OffsetTracker`] because by now earlier deletions in this
//!            step have shrunk the buffer.
//!
//!     All offsets are snapshot offsets. Steps 1 and 2 issue them directly:
//!     a field replacement is net length-preserving (the installed field
//!     occupies the same source text it replaced), so nothing has drifted by
//!     the time step 2 reads its coordinates. Step 3 is the step that
//!     actually shrinks the buffer, and under the default
//!     [`ShiftPolicy::TrailingOnly`] the only one that compensates.
//!     [`ShiftPolicy::AllEdits`] is the uniformly-compensated alternative
//!     for collaborators that want every coordinate mapped through one
//!     tracker.

use super::editor::{DocumentEditor, EditorError};
use super::matching::match_blocks;
use super::scanning::{normalize_newlines, scan_block_delimiters, scan_directives, scan_fields};
use super::shifting::OffsetTracker;
use super::tags::{BlockSpan, FieldTag, GenericDirective};

/// How resolution compensates coordinates for earlier edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftPolicy {
    /// Fields and sub-ranges use raw snapshot coordinates; only the
    /// trailing directive-removal step runs through the tracker, starting
    /// from zero shift. Exact whenever field replacement preserves length.
    TrailingOnly,
    /// The corrected contract: one tracker, one merged position-ordered
    /// pass. Field replacements and directive deletions consume it;
    /// sub-range registrations read it (keyed just before their opening
    /// delimiter), so a block registered after earlier deletions lands on
    /// live-buffer coordinates. Directives swallowed by a lazy field body
    /// are skipped instead of deleted twice.
    AllEdits,
}

/// Knobs for one resolve call.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Prefix prepended to every registered sub-range name.
    pub block_name_prefix: String,
    pub shift_policy: ShiftPolicy,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            block_name_prefix: "block:".to_string(),
            shift_policy: ShiftPolicy::TrailingOnly,
        }
    }
}

/// Counts of operations issued by one resolve call. A buffer with no
/// remaining markup resolves to all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOutcome {
    pub fields: usize,
    pub blocks: usize,
    pub directives_removed: usize,
}

/// Resolve with default options.
pub fn resolve<E: DocumentEditor>(editor: &mut E) -> Result<ResolveOutcome, EditorError> {
    resolve_with(editor, &ResolveOptions::default())
}

/// Resolve all merge markup in the editor's current text.
pub fn resolve_with<E: DocumentEditor>(
    editor: &mut E,
    options: &ResolveOptions,
) -> Result<ResolveOutcome, EditorError> {
    let snapshot = normalize_newlines(&editor.text());

    let fields = scan_fields(&snapshot);
    let delimiters = scan_block_delimiters(&snapshot);
    let blocks = match_blocks(&delimiters);
    let directives = scan_directives(&snapshot);

    match options.shift_policy {
        ShiftPolicy::TrailingOnly => {
            resolve_trailing_only(editor, options, &fields, &blocks, &directives)
        }
        ShiftPolicy::AllEdits => resolve_all_edits(editor, options, &fields, &blocks, &directives),
    }
}

fn resolve_trailing_only<E: DocumentEditor>(
    editor: &mut E,
    options: &ResolveOptions,
    fields: &[FieldTag],
    blocks: &[BlockSpan],
    directives: &[GenericDirective],
) -> Result<ResolveOutcome, EditorError> {
    let mut outcome = ResolveOutcome::default();

    for tag in fields {
        replace_field(editor, tag, tag.span.start)?;
        outcome.fields += 1;
    }

    for block in blocks {
        register_block(editor, options, block, block.span.start)?;
        outcome.blocks += 1;
    }

    let mut tracker = OffsetTracker::new();
    for directive in directives {
        let start = tracker.apply(directive.span, 0);
        editor.select_range(start, directive.span.len())?;
        editor.set_selection_text("")?;
        outcome.directives_removed += 1;
    }

    Ok(outcome)
}

/// One operation in the merged `AllEdits` pass.
enum Op<'a> {
    Field(&'a FieldTag),
    Block(&'a BlockSpan),
    Directive(&'a GenericDirective),
}

impl Op<'_> {
    /// Sort key: original start, with a block keyed at its opening
    /// delimiter's first brace (one before its span start) so registration
    /// precedes the deletion of that very delimiter.
    fn sort_key(&self) -> (usize, u8) {
        match self {
            Op::Block(block) => (block.span.start - 1, 0),
            Op::Field(tag) => (tag.span.start, 1),
            Op::Directive(directive) => (directive.span.start, 1),
        }
    }
}

fn resolve_all_edits<E: DocumentEditor>(
    editor: &mut E,
    options: &ResolveOptions,
    fields: &[FieldTag],
    blocks: &[BlockSpan],
    directives: &[GenericDirective],
) -> Result<ResolveOutcome, EditorError> {
    let mut outcome = ResolveOutcome::default();

    let overlaps_a_field = |directive: &GenericDirective| {
        fields
            .iter()
            .any(|tag| tag.span.start < directive.span.end && directive.span.start < tag.span.end)
    };

    let mut ops: Vec<Op> = fields
        .iter()
        .map(Op::Field)
        .chain(blocks.iter().map(Op::Block))
        .chain(
            directives
                .iter()
                .filter(|d| !overlaps_a_field(d))
                .map(Op::Directive),
        )
        .collect();
    ops.sort_by_key(Op::sort_key);

    let mut tracker = OffsetTracker::new();
    for op in ops {
        match op {
            Op::Field(tag) => {
                // The display fallback is the tag's own source text, so the
                // declared replacement length equals the removed length.
                let start = tracker.apply(tag.span, tag.span.len());
                replace_field(editor, tag, start)?;
                outcome.fields += 1;
            }
            Op::Block(block) => {
                let start = tracker.shifted(block.span.start - 1) + 1;
                register_block(editor, options, block, start)?;
                outcome.blocks += 1;
            }
            Op::Directive(directive) => {
                let start = tracker.apply(directive.span, 0);
                editor.select_range(start, directive.span.len())?;
                editor.set_selection_text("")?;
                outcome.directives_removed += 1;
            }
        }
    }

    Ok(outcome)
}

fn replace_field<E: DocumentEditor>(
    editor: &mut E,
    tag: &FieldTag,
    start: usize,
) -> Result<(), EditorError> {
    editor.select_range(start, tag.span.len())?;
    let source = editor.selection_text();
    let field = editor.register_field(&tag.name, &source)?;
    editor.set_selection_text("")?;
    editor.add_field(field)
}

fn register_block<E: DocumentEditor>(
    editor: &mut E,
    options: &ResolveOptions,
    block: &BlockSpan,
    start: usize,
) -> Result<(), EditorError> {
    let name = format!("{}{}", options.block_name_prefix, block.name);
    editor.register_sub_range(&name, start, block.span.len())
}
