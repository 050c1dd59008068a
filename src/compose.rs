//! Page composition.
//!
//! All pages share one HTML template. The template marks its slots with
//! literal placeholders which are replaced verbatim, without escaping:
//!
//! | Placeholder            | Document page                 | Index page          |
//! |------------------------|-------------------------------|---------------------|
//! | `{{PAGE_TITLE}}`       | title or fallback title       | configured title    |
//! | `{{META_DESCRIPTION}}` | `description` frontmatter     | configured text     |
//! | `{{PAGE_HEADER}}`      | header block (if titled)      | empty               |
//! | `{{PAGE_CONTENT}}`     | rendered markdown             | hero + card grids   |
//! | `{{NAVIGATION}}`       | navigation block              | navigation block    |
//! | `{{TOC_SECTION}}`      | "On this page" aside          | empty               |
//! | `{{INDEX_PATH}}`       | `index.html`                  | `index.html`        |
//!
//! Only the first occurrence of each placeholder in the template is
//! replaced, and inserted values are never scanned for placeholders. A
//! placeholder the template lacks is simply not filled.

use crate::config::SiteConfig;
use crate::nav::{self, CurrentPage, INDEX_PATH};
use crate::toc;
use crate::types::{Document, SectionGroups};
use maud::{Markup, html};

/// A named template slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    PageTitle,
    MetaDescription,
    PageHeader,
    PageContent,
    Navigation,
    TocSection,
    IndexPath,
}

impl Placeholder {
    pub const ALL: [Placeholder; 7] = [
        Placeholder::PageTitle,
        Placeholder::MetaDescription,
        Placeholder::PageHeader,
        Placeholder::PageContent,
        Placeholder::Navigation,
        Placeholder::TocSection,
        Placeholder::IndexPath,
    ];

    /// The literal token in the template.
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::PageTitle => "{{PAGE_TITLE}}",
            Placeholder::MetaDescription => "{{META_DESCRIPTION}}",
            Placeholder::PageHeader => "{{PAGE_HEADER}}",
            Placeholder::PageContent => "{{PAGE_CONTENT}}",
            Placeholder::Navigation => "{{NAVIGATION}}",
            Placeholder::TocSection => "{{TOC_SECTION}}",
            Placeholder::IndexPath => "{{INDEX_PATH}}",
        }
    }
}

/// Values for every slot of one page.
#[derive(Debug, Default)]
pub struct PageSlots {
    pub title: String,
    pub description: String,
    pub header: String,
    pub content: String,
    pub navigation: String,
    pub toc: String,
    pub index_path: String,
}

impl PageSlots {
    fn value(&self, placeholder: Placeholder) -> &str {
        match placeholder {
            Placeholder::PageTitle => &self.title,
            Placeholder::MetaDescription => &self.description,
            Placeholder::PageHeader => &self.header,
            Placeholder::PageContent => &self.content,
            Placeholder::Navigation => &self.navigation,
            Placeholder::TocSection => &self.toc,
            Placeholder::IndexPath => &self.index_path,
        }
    }
}

/// Placeholders the template does not contain.
pub fn missing_placeholders(template: &str) -> Vec<Placeholder> {
    Placeholder::ALL
        .into_iter()
        .filter(|p| !template.contains(p.token()))
        .collect()
}

/// Replace the first occurrence of each placeholder in `template`.
pub fn fill_template(template: &str, slots: &PageSlots) -> String {
    let mut hits: Vec<(usize, Placeholder)> = Placeholder::ALL
        .into_iter()
        .filter_map(|p| template.find(p.token()).map(|pos| (pos, p)))
        .collect();
    hits.sort_by_key(|(pos, _)| *pos);

    let extra: usize = hits.iter().map(|(_, p)| slots.value(*p).len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut cursor = 0;
    for (pos, placeholder) in hits {
        // Tokens cannot overlap each other, but guard against it anyway.
        if pos < cursor {
            continue;
        }
        out.push_str(&template[cursor..pos]);
        out.push_str(slots.value(placeholder));
        cursor = pos + placeholder.token().len();
    }
    out.push_str(&template[cursor..]);
    out
}

/// Header block for a document with an explicit `title`.
fn page_header(doc: &Document, title: &str) -> Markup {
    html! {
        div.page-header {
            div.container-medium {
                h1 { (title) }
                @if let Some(subtitle) = doc.meta("subtitle") {
                    p.page-subtitle { (subtitle) }
                }
                a.button.is-small.is-faded.page-source-link
                    href={ "../" (doc.markdown_path) }
                    target="_blank"
                    rel="noopener noreferrer" { "View as Markdown" }
            }
        }
    }
}

fn toc_section(doc: &Document) -> Markup {
    let outline = toc::extract(&doc.html);
    html! {
        aside.docs-toc {
            span.toc-header { "On this page" }
            div.toc-wrapper { (toc::render(&outline)) }
        }
    }
}

/// Compose the page for one document.
pub fn document_page(
    template: &str,
    doc: &Document,
    sections: &SectionGroups,
    site: &SiteConfig,
) -> String {
    let navigation = nav::render_nav(sections, CurrentPage::Document(&doc.filename), site);
    let header = doc
        .meta("title")
        .map(|title| page_header(doc, title).into_string())
        .unwrap_or_default();

    let slots = PageSlots {
        title: doc
            .meta("title")
            .unwrap_or(site.fallback_title.as_str())
            .to_string(),
        description: doc.meta("description").unwrap_or_default().to_string(),
        header,
        content: doc.html.clone(),
        navigation: navigation.into_string(),
        toc: toc_section(doc).into_string(),
        index_path: INDEX_PATH.to_string(),
    };
    fill_template(template, &slots)
}

fn index_content(sections: &SectionGroups, site: &SiteConfig) -> Markup {
    html! {
        div.docs-hero {
            h1.docs-hero-title { (site.index_title) }
            p.docs-hero-description { (site.hero_description) }
        }
        @for section in sections.ordered(&site.section_order, site.default_order) {
            div.docs-section {
                h2.eyebrow { (section.name) }
                div.grid.cols-3.gap-xl {
                    @for doc in &section.documents {
                        a.docs-card href=(doc.html_path) {
                            h3.docs-card-title { (doc.title) }
                            @if let Some(subtitle) = doc.meta("subtitle") {
                                p.docs-card-subtitle { (subtitle) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Compose the index page: a card grid of every document, by section.
pub fn index_page(template: &str, sections: &SectionGroups, site: &SiteConfig) -> String {
    let slots = PageSlots {
        title: site.index_title.clone(),
        description: site.index_description.clone(),
        header: String::new(),
        content: index_content(sections, site).into_string(),
        navigation: nav::render_nav(sections, CurrentPage::Index, site).into_string(),
        toc: String::new(),
        index_path: INDEX_PATH.to_string(),
    };
    fill_template(template, &slots)
}
