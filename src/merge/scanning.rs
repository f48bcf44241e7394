//! Tag scanning - three independent regex grammars over one snapshot
//!
//!     Merge markup comes in three disjoint kinds, and each kind gets its own
//!     scan over the same immutable text:
//!
//!         1. Field tags: `{{name}}` - any tag whose body does not start with
//!            `#` or `/`. The body is captured and whitespace-stripped into
//!            the field name.
//!         2. Generic directives: any `{{#...}}` or `{{/...}}` tag. These are
//!            span-only and exist to be deleted after fields and blocks have
//!            been resolved.
//!         3. Block delimiters: specifically `{{#foreach x}}` (open) and
//!            `{{/foreach x}}` (close). These feed the block matcher.
//!
//!     The grammars are deliberately NOT coupled into one parser. They are
//!     genuinely independent - a buffer is scanned three times and the
//!     resolver composes the results by order of operations, so each pattern
//!     stays a one-liner instead of one grammar with three modes.
//!
//! Matching semantics
//!
//!     All three patterns rely on the engine's leftmost, non-overlapping,
//!     minimal-body behavior: bodies are lazy (`.*?`), so a tag always closes
//!     at the earliest `}}` that completes it. `.` does not match `\n`, so no
//!     tag body ever spans a line break.
//!
//!     The field grammar needs "first body character is not `#` or `/`",
//!     which the host engine cannot express as a lookahead. It is written as
//!     an ordered alternation instead, with the empty body first: trying the
//!     empty body before `[^#/\n].*?` keeps the minimal match (`{{}}` inside
//!     `{{}}}}` must span four characters, not five).

use once_cell::sync::Lazy;
use regex::Regex;

use super::tags::{BlockDelimiter, DelimiterKind, FieldTag, GenericDirective, Span};

/// Field tags: `{{` + body not starting with `#`/`/` (possibly empty) + `}}`.
static FIELD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(|[^#/\n].*?)\}\}").unwrap());

/// Generic directives: `{{#...}}` or `{{/...}}`, body ignored.
static DIRECTIVE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{[#/].*?\}\}").unwrap());

/// Block delimiters: `{{#foreach x}}` / `{{/foreach x}}`. Whitespace is
/// tolerated between the keyword and the identifier, before `/foreach`, and
/// before the closing braces; the identifier itself is word characters only.
static BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{(?:#foreach\s+(?P<open>\w+)\s*|\s*/foreach\s+(?P<close>\w+)\s*)\}\}").unwrap()
});

/// Collapse `\r\n` line endings to `\n`.
///
/// Every scan (and every offset derived from one) assumes the snapshot uses
/// a single newline convention; the resolver normalizes its snapshot with
/// this before scanning.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Scan field tags, in left-to-right occurrence order (ascending by start).
pub fn scan_fields(text: &str) -> Vec<FieldTag> {
    FIELD_REGEX
        .captures_iter(text)
        .map(|caps| {
            let whole = caps.get(0).unwrap();
            let body = caps.get(1).map_or("", |m| m.as_str());
            FieldTag {
                span: Span::new(whole.start(), whole.end()),
                name: body.chars().filter(|c| !c.is_whitespace()).collect(),
            }
        })
        .collect()
}

/// Scan generic directives, in left-to-right occurrence order.
pub fn scan_directives(text: &str) -> Vec<GenericDirective> {
    DIRECTIVE_REGEX
        .find_iter(text)
        .map(|m| GenericDirective {
            span: Span::new(m.start(), m.end()),
        })
        .collect()
}

/// Scan `foreach` block delimiters, in left-to-right occurrence order.
///
/// `kind` is [`DelimiterKind::Open`] iff the tag begins with `#foreach`.
pub fn scan_block_delimiters(text: &str) -> Vec<BlockDelimiter> {
    BLOCK_REGEX
        .captures_iter(text)
        .map(|caps| {
            let whole = caps.get(0).unwrap();
            // Exactly one of the two named groups captures per match.
            let (kind, variable) = match caps.name("open") {
                Some(m) => (DelimiterKind::Open, m.as_str()),
                None => (DelimiterKind::Close, caps.name("close").unwrap().as_str()),
            };
            BlockDelimiter {
                span: Span::new(whole.start(), whole.end()),
                kind,
                variable: variable.to_string(),
            }
        })
        .collect()
}
