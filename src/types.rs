//! Shared types used by the scan and generate stages.

use crate::frontmatter::Frontmatter;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One markdown source file, parsed and rendered.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Source file name, e.g. `getting-started.md`. Identifies the page.
    pub filename: String,
    /// File name without the `.md` extension.
    pub stem: String,
    /// `title` frontmatter, or the stem as fallback.
    pub title: String,
    /// `section` frontmatter, or the configured default section.
    pub section: String,
    /// Output file name relative to the output directory, e.g. `getting-started.html`.
    pub html_path: String,
    /// Source file name as linked from the page header.
    pub markdown_path: String,
    pub source_path: PathBuf,
    pub frontmatter: Frontmatter,
    /// Markdown body with the frontmatter removed.
    #[serde(skip)]
    pub body: String,
    /// Rendered body HTML.
    #[serde(skip)]
    pub html: String,
}

impl Document {
    /// Frontmatter value for `key`, if present and non-empty.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.frontmatter
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Numeric `order`, or `default` when absent or not a number.
    pub fn order(&self, default: f64) -> f64 {
        self.meta("order")
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(default)
    }
}

/// Documents grouped by section name, each group in scan order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SectionGroups {
    groups: BTreeMap<String, Vec<Document>>,
}

/// A section with its documents in display order.
#[derive(Debug)]
pub struct Section<'a> {
    pub name: &'a str,
    pub documents: Vec<&'a Document>,
}

impl SectionGroups {
    /// Append `doc` to its section, creating the section on first use.
    pub fn push(&mut self, doc: Document) {
        self.groups.entry(doc.section.clone()).or_default().push(doc);
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// All documents, section by section.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.groups.values().flatten()
    }

    /// Sections in display order with their documents sorted for display.
    ///
    /// Sections named in `preferred` come first, in that order; the rest
    /// follow alphabetically. Within a section, documents are sorted by
    /// `order` (missing → `default_order`), then by title.
    pub fn ordered(&self, preferred: &[String], default_order: f64) -> Vec<Section<'_>> {
        let mut names: Vec<&str> = self.section_names().collect();
        names.sort_by(|a, b| compare_sections(a, b, preferred));

        names
            .into_iter()
            .map(|name| {
                let mut documents: Vec<&Document> = self.groups[name].iter().collect();
                documents.sort_by(|a, b| {
                    a.order(default_order)
                        .total_cmp(&b.order(default_order))
                        .then_with(|| a.title.cmp(&b.title))
                });
                Section { name, documents }
            })
            .collect()
    }
}

fn compare_sections(a: &str, b: &str, preferred: &[String]) -> Ordering {
    let rank = |name: &str| preferred.iter().position(|p| p == name);
    match (rank(a), rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::doc;

    fn preferred() -> Vec<String> {
        ["Design System", "Code", "Content", "Project"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn names<'a>(sections: &'a [Section<'a>]) -> Vec<&'a str> {
        sections.iter().map(|s| s.name).collect()
    }

    #[test]
    fn preferred_sections_come_first() {
        let mut groups = SectionGroups::default();
        groups.push(doc("a.md", "A", "Project", None));
        groups.push(doc("b.md", "B", "Design System", None));

        let sections = groups.ordered(&preferred(), 999.0);
        assert_eq!(names(&sections), vec!["Design System", "Project"]);
    }

    #[test]
    fn unknown_sections_follow_alphabetically() {
        let mut groups = SectionGroups::default();
        groups.push(doc("z.md", "Z", "zeta", None));
        groups.push(doc("a.md", "A", "alpha", None));
        groups.push(doc("c.md", "C", "Code", None));

        let sections = groups.ordered(&preferred(), 999.0);
        assert_eq!(names(&sections), vec!["Code", "alpha", "zeta"]);
    }

    #[test]
    fn documents_sorted_by_order_then_title() {
        let mut groups = SectionGroups::default();
        groups.push(doc("c.md", "Charlie", "Code", None));
        groups.push(doc("b.md", "Bravo", "Code", Some("2")));
        groups.push(doc("a.md", "Alpha", "Code", None));
        groups.push(doc("d.md", "Delta", "Code", Some("1")));

        let sections = groups.ordered(&preferred(), 999.0);
        let titles: Vec<&str> = sections[0]
            .documents
            .iter()
            .map(|d| d.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Delta", "Bravo", "Alpha", "Charlie"]);
    }

    #[test]
    fn non_numeric_order_uses_default() {
        let d = doc("x.md", "X", "Code", Some("first"));
        assert_eq!(d.order(999.0), 999.0);
        let d = doc("y.md", "Y", "Code", Some("1.5"));
        assert_eq!(d.order(999.0), 1.5);
    }

    #[test]
    fn no_section_is_dropped() {
        let mut groups = SectionGroups::default();
        for (i, section) in ["Project", "misc", "Code", "Content"].iter().enumerate() {
            groups.push(doc(&format!("{i}.md"), "T", section, None));
        }
        assert_eq!(groups.ordered(&preferred(), 999.0).len(), 4);
        assert_eq!(groups.documents().count(), 4);
    }

    #[test]
    fn meta_ignores_empty_values() {
        let mut d = doc("x.md", "X", "Code", None);
        d.frontmatter.insert("subtitle".into(), String::new());
        assert_eq!(d.meta("subtitle"), None);
    }
}
