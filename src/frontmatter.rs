//! Frontmatter parsing.
//!
//! A document may start with a block of `key: value` lines fenced by `---`:
//!
//! ```text
//! ---
//! title: "Getting Started"
//! section: Code
//! order: 2
//! ---
//! # Body starts here
//! ```
//!
//! The parser is deliberately forgiving. A missing closing fence means the
//! document has no frontmatter, and header lines without a colon are skipped.
//! Values are never typed: everything stays a string.

use std::collections::BTreeMap;

/// Parsed frontmatter keys and values, in key order.
pub type Frontmatter = BTreeMap<String, String>;

const FENCE: &str = "---";

/// Result of splitting a document into its header and body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedDocument {
    pub frontmatter: Frontmatter,
    /// Trimmed markdown body.
    pub body: String,
}

/// Split `content` into frontmatter and body.
///
/// - `"---\ntitle: Hi\n---\nBody"` → `{title: "Hi"}`, `"Body"`
/// - `"No fence here"` → `{}`, `"No fence here"`
/// - `"---\ntitle: Hi\nno closing fence"` → `{}`, whole text trimmed
pub fn parse(content: &str) -> ParsedDocument {
    match split_fenced(content) {
        Some((header, body)) => ParsedDocument {
            frontmatter: parse_header(header),
            body: body.trim().to_string(),
        },
        None => ParsedDocument {
            frontmatter: Frontmatter::new(),
            body: content.trim().to_string(),
        },
    }
}

/// Locate the header block between the opening and closing fences.
///
/// The opening fence must be the first line. The closing fence is a later
/// line consisting of `---` and optional trailing whitespace, and it must be
/// followed by a line break. The line right after the opening fence always
/// belongs to the header, so two adjacent fences do not close an empty block.
fn split_fenced(content: &str) -> Option<(&str, &str)> {
    let (first, mut rest) = next_line(content)?;
    if !is_fence(first) {
        return None;
    }

    let header_start = content.len() - rest.len();
    let (_, after_first) = next_line(rest)?;
    rest = after_first;
    loop {
        let line_start = content.len() - rest.len();
        let (line, after) = next_line(rest)?;
        if is_fence(line) {
            let header = content[header_start..line_start].trim_end_matches(['\r', '\n']);
            return Some((header, after));
        }
        rest = after;
    }
}

/// Split off the first line, requiring a terminating newline.
fn next_line(text: &str) -> Option<(&str, &str)> {
    let end = text.find('\n')?;
    let line = text[..end].trim_end_matches('\r');
    Some((line, &text[end + 1..]))
}

fn is_fence(line: &str) -> bool {
    line.trim_end() == FENCE
}

fn parse_header(header: &str) -> Frontmatter {
    let mut frontmatter = Frontmatter::new();
    for line in header.lines() {
        // A colon at position 0 means an empty key; skip it like a colon-less line.
        let Some(colon) = line.find(':').filter(|&pos| pos > 0) else {
            continue;
        };
        let key = line[..colon].trim();
        let value = strip_quotes(line[colon + 1..].trim());
        frontmatter.insert(key.to_string(), value.to_string());
    }
    frontmatter
}

/// Drop one leading and one trailing quote character, if present.
fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix(['"', '\'']).unwrap_or(value);
    value.strip_suffix(['"', '\'']).unwrap_or(value)
}
