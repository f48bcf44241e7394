//! Grammar-level tests for the three tag scanners.

use mergemark::merge::testing::assert_tags;
use mergemark::{scan_block_delimiters, scan_directives, scan_fields, DelimiterKind};
use rstest::rstest;

#[rstest]
#[case::plain_prose("no tags here", &[])]
#[case::simple("Hello {{ name }}!", &[("name", 6, 16)])]
#[case::adjacent("{{a}}{{b}}", &[("a", 0, 5), ("b", 5, 10)])]
#[case::inner_whitespace_stripped("{{first name}}", &[("firstname", 0, 14)])]
#[case::empty_body("{{}}", &[("", 0, 4)])]
#[case::open_directive_excluded("{{#x}}", &[])]
#[case::close_directive_excluded("{{/x}}", &[])]
#[case::mixed_with_block("a {{x}} {{#foreach t}}b{{/foreach t}}", &[("x", 2, 7)])]
#[case::unclosed("{{name", &[])]
fn field_grammar(#[case] input: &str, #[case] expected: &[(&str, usize, usize)]) {
    let fields = scan_fields(input);
    assert_eq!(fields.len(), expected.len(), "in {:?}: {:#?}", input, fields);
    for (tag, (name, start, end)) in fields.iter().zip(expected) {
        assert_eq!(tag.name, *name);
        assert_eq!((tag.span.start, tag.span.end), (*start, *end));
    }
}

#[rstest]
#[case::plain_prose("no tags here", &[])]
#[case::open_and_close("{{#foreach a}} {{x}} {{/foreach a}}", &[(0, 14), (21, 35)])]
#[case::arbitrary_directives("{{#if c}}..{{/if c}}", &[(0, 9), (11, 20)])]
#[case::field_is_not_a_directive("{{name}}", &[])]
fn directive_grammar(#[case] input: &str, #[case] expected: &[(usize, usize)]) {
    let directives = scan_directives(input);
    assert_eq!(
        directives.len(),
        expected.len(),
        "in {:?}: {:#?}",
        input,
        directives
    );
    for (directive, (start, end)) in directives.iter().zip(expected) {
        assert_eq!((directive.span.start, directive.span.end), (*start, *end));
    }
}

#[rstest]
#[case::open("{{#foreach item}}", Some((DelimiterKind::Open, "item")))]
#[case::close("{{/foreach item}}", Some((DelimiterKind::Close, "item")))]
#[case::close_leading_whitespace("{{ /foreach a}}", Some((DelimiterKind::Close, "a")))]
#[case::trailing_whitespace("{{#foreach a }}", Some((DelimiterKind::Open, "a")))]
#[case::not_foreach("{{#if a}}", None)]
#[case::missing_separator("{{#foreachx}}", None)]
#[case::missing_identifier("{{#foreach }}", None)]
fn block_delimiter_grammar(#[case] input: &str, #[case] expected: Option<(DelimiterKind, &str)>) {
    let delimiters = scan_block_delimiters(input);
    match expected {
        None => assert!(delimiters.is_empty(), "in {:?}: {:#?}", input, delimiters),
        Some((kind, variable)) => {
            assert_eq!(delimiters.len(), 1, "in {:?}: {:#?}", input, delimiters);
            assert_eq!(delimiters[0].kind, kind);
            assert_eq!(delimiters[0].variable, variable);
        }
    }
}

#[test]
fn scans_are_independent_over_one_buffer() {
    assert_tags("Dear {{ name }},\n{{#foreach item}}* {{ item }}\n{{/foreach item}}Bye")
        .field_count(2)
        .field(0, "name", 5, 15)
        .field(1, "item", 36, 46)
        .block_count(1)
        .block(0, "item", 18, 65)
        .directive_count(2);
}

#[test]
fn field_spans_cover_the_exact_tag_text() {
    let text = "Hello {{ name }}!";
    let fields = scan_fields(text);
    assert_eq!(fields[0].span.slice(text), "{{ name }}");
}
