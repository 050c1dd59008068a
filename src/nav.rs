//! Sidebar navigation.
//!
//! Every page carries the full navigation: a `Home` link followed by one
//! collapsible group per section. Groups render expanded; collapsing on small
//! screens is left to the stylesheet.

use crate::config::SiteConfig;
use crate::types::SectionGroups;
use maud::{Markup, PreEscaped, html};

/// Link target of the `Home` entry.
pub const INDEX_PATH: &str = "index.html";

const TOGGLE_ICON: &str = r#"<svg width="6" height="6" viewBox="0 0 6 6" fill="none" xmlns="http://www.w3.org/2000/svg"><path d="M3.58943 3L1.28943 0.7L1.98943 0L4.98943 3L1.98943 6L1.28943 5.3L3.58943 3Z" fill="currentColor"/></svg>"#;

/// The page a navigation block is rendered for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurrentPage<'a> {
    Index,
    /// A document page, identified by its source file name.
    Document(&'a str),
}

/// Display label for a section name.
///
/// The `overview` section reads as "Pages"; any other name gets its first
/// letter upper-cased.
pub fn section_label(section: &str) -> String {
    if section == "overview" {
        return "Pages".to_string();
    }
    let mut chars = section.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render the navigation block for `current`.
pub fn render_nav(sections: &SectionGroups, current: CurrentPage<'_>, site: &SiteConfig) -> Markup {
    let home_active = current == CurrentPage::Index;

    html! {
        ul.nav-list.nav-home {
            li {
                a.nav-link.nav-link-active[home_active] href=(INDEX_PATH) { "Home" }
            }
        }
        @for section in sections.ordered(&site.section_order, site.default_order) {
            details.nav-section open {
                summary.nav-section-toggle {
                    span { (section_label(section.name)) }
                    span.nav-toggle-icon { (PreEscaped(TOGGLE_ICON)) }
                }
                ul.nav-list {
                    @for doc in &section.documents {
                        @let active = current == CurrentPage::Document(&doc.filename);
                        li {
                            a.nav-link.nav-link-active[active] href=(doc.html_path) { (doc.title) }
                        }
                    }
                }
            }
        }
    }
}
