//! Table of contents extraction.
//!
//! Works on rendered HTML: only headings that already carry an `id` (see
//! [`crate::markdown::add_heading_ids`]) can be linked to, so only those are
//! collected. The outline is flat and keeps levels 1 and 2.

use maud::{Markup, PreEscaped, html};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static HEADING_WITH_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<h([1-6])[^>]*\sid="([^"]*)"[^>]*>(.*?)</h[1-6]>"#).unwrap()
});
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Deepest heading level kept in the outline.
const MAX_LEVEL: u8 = 2;

/// One linked heading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocEntry {
    pub level: u8,
    pub id: String,
    /// Heading text with nested tags removed. Still HTML-escaped.
    pub text: String,
}

/// Outline of a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Toc {
    /// The page has no linkable level 1 or 2 heading.
    Empty,
    Outline(Vec<TocEntry>),
}

impl Toc {
    pub fn entries(&self) -> &[TocEntry] {
        match self {
            Toc::Empty => &[],
            Toc::Outline(entries) => entries,
        }
    }
}

/// Collect linkable level 1 and 2 headings in document order.
pub fn extract(html: &str) -> Toc {
    let entries: Vec<TocEntry> = HEADING_WITH_ID
        .captures_iter(html)
        .filter_map(|caps| {
            let level: u8 = caps[1].parse().ok()?;
            (level <= MAX_LEVEL).then(|| TocEntry {
                level,
                id: caps[2].to_string(),
                text: TAG.replace_all(&caps[3], "").trim().to_string(),
            })
        })
        .collect();

    if entries.is_empty() {
        Toc::Empty
    } else {
        Toc::Outline(entries)
    }
}

/// Render the outline, or the placeholder when there is nothing to link.
pub fn render(toc: &Toc) -> Markup {
    match toc {
        Toc::Empty => html! {
            div.toc-empty { "No headings found" }
        },
        Toc::Outline(entries) => html! {
            nav.toc {
                ul.toc-list {
                    @for entry in entries {
                        li class={ "toc-item toc-level-" (entry.level) } {
                            // Text comes from rendered HTML and is already escaped.
                            a.toc-link href={ "#" (entry.id) } { (PreEscaped(&entry.text)) }
                        }
                    }
                }
            }
        },
    }
}
