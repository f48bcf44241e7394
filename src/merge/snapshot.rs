//! Tag snapshot - a normalized, serializable capture of one buffer's markup
//!
//!     Tooling and tests want "everything the scanners and the matcher see"
//!     as one value instead of four piecemeal calls. The snapshot normalizes
//!     newlines, runs all three scans plus the block matcher, and serializes
//!     to JSON for inspection.

use serde::{Deserialize, Serialize};

use super::matching::match_blocks;
use super::scanning::{normalize_newlines, scan_block_delimiters, scan_directives, scan_fields};
use super::tags::{BlockDelimiter, BlockSpan, FieldTag, GenericDirective};

/// Everything discovered in one buffer, in discovery order per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagSnapshot {
    pub fields: Vec<FieldTag>,
    pub delimiters: Vec<BlockDelimiter>,
    pub blocks: Vec<BlockSpan>,
    pub directives: Vec<GenericDirective>,
}

impl TagSnapshot {
    /// Scan and match everything in `text` (newline-normalized first).
    pub fn capture(text: &str) -> Self {
        let normalized = normalize_newlines(text);
        let delimiters = scan_block_delimiters(&normalized);
        let blocks = match_blocks(&delimiters);
        Self {
            fields: scan_fields(&normalized),
            delimiters,
            blocks,
            directives: scan_directives(&normalized),
        }
    }

    /// True when the buffer carries no merge markup at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.directives.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
