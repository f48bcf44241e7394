//! Property-based tests for the tag scanners and the resolver
//!
//! These ensure that scanning arbitrary text never panics or produces
//! out-of-bounds spans, and that resolution stays total over buffers built
//! from well-formed markup fragments.

use proptest::prelude::*;

use mergemark::{
    match_blocks, normalize_newlines, resolve, resolve_with, scan_block_delimiters,
    scan_directives, scan_fields, BufferEditor, ResolveOptions, ShiftPolicy, Span,
};

fn assert_spans_sane(spans: &[Span], text: &str) {
    for span in spans {
        assert!(span.start <= span.end);
        assert!(span.end <= text.len());
        assert!(text.is_char_boundary(span.start));
        assert!(text.is_char_boundary(span.end));
    }
    for pair in spans.windows(2) {
        // Left-to-right, non-overlapping.
        assert!(pair[0].end <= pair[1].start);
    }
}

/// Fragments that compose into well-formed (if meaningless) merge markup.
fn fragment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "alpha ",
        "beta\n",
        ", ",
        "{{ name }}",
        "{{x}}",
        "{{}}",
        "{{#foreach a}}",
        "{{/foreach a}}",
        "{{#foreach b}}",
        "{{/foreach b}}",
        "{{#section}}",
        "{{/section}}",
    ])
}

proptest! {
    #[test]
    fn scanning_arbitrary_text_never_panics(input in ".*") {
        let fields = scan_fields(&input);
        assert_spans_sane(&fields.iter().map(|t| t.span).collect::<Vec<_>>(), &input);
        for tag in &fields {
            prop_assert!(tag.name.chars().all(|c| !c.is_whitespace()));
            prop_assert!(!tag.name.starts_with('#'));
            prop_assert!(!tag.name.starts_with('/'));
        }

        let directives = scan_directives(&input);
        assert_spans_sane(&directives.iter().map(|d| d.span).collect::<Vec<_>>(), &input);

        let delimiters = scan_block_delimiters(&input);
        assert_spans_sane(&delimiters.iter().map(|d| d.span).collect::<Vec<_>>(), &input);

        let blocks = match_blocks(&delimiters);
        prop_assert!(blocks.len() * 2 <= delimiters.len());
        for pair in blocks.windows(2) {
            prop_assert!(pair[0].span.start <= pair[1].span.start);
        }
    }

    #[test]
    fn resolution_is_total_over_fragment_buffers(
        fragments in prop::collection::vec(fragment(), 0..12)
    ) {
        let text = normalize_newlines(&fragments.concat());
        let directive_count = scan_directives(&text).len();

        let mut editor = BufferEditor::new(text);
        let outcome = resolve(&mut editor).unwrap();
        prop_assert_eq!(outcome.directives_removed, directive_count);
    }

    #[test]
    fn shift_policies_agree_over_fragment_buffers(
        fragments in prop::collection::vec(fragment(), 0..12)
    ) {
        // Every fragment is a complete tag or plain text, so no lazy field
        // body can swallow a directive and the two policies must converge
        // on the same final buffer.
        let text = normalize_newlines(&fragments.concat());

        let mut trailing = BufferEditor::new(text.clone());
        let trailing_outcome = resolve_with(&mut trailing, &ResolveOptions {
            shift_policy: ShiftPolicy::TrailingOnly,
            ..ResolveOptions::default()
        }).unwrap();

        let mut uniform = BufferEditor::new(text);
        let uniform_outcome = resolve_with(&mut uniform, &ResolveOptions {
            shift_policy: ShiftPolicy::AllEdits,
            ..ResolveOptions::default()
        }).unwrap();

        prop_assert_eq!(trailing_outcome, uniform_outcome);
        prop_assert_eq!(trailing.buffer(), uniform.buffer());
    }
}
