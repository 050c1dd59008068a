//! Markdown to HTML rendering.
//!
//! Rendering happens in two steps. `pulldown-cmark` turns the body into HTML
//! with GitHub-flavored extensions, and with every soft line break promoted to
//! a hard `<br />` so that a single newline in the source starts a new line.
//! Then three post-passes run over the HTML string, in this order:
//!
//! 1. [`add_heading_ids`]: `id` attributes on plain-text headings
//! 2. [`harden_external_links`]: `target="_blank"` and `rel="noopener noreferrer"`
//! 3. [`wrap_code_blocks`]: copy-to-clipboard wrapper around each code block
//!
//! The post-passes work on the HTML text rather than the event stream so that
//! headings and links written as raw HTML inside the markdown get the same
//! treatment as generated ones.

use pulldown_cmark::{Event, Options, Parser, html};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<h([1-6])>([^<]+)</h[1-6]>").unwrap());
static NON_ID_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").unwrap());
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static HYPHEN_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());
static ANCHOR_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\s+[^>]*?href=["']([^"']+)["'][^>]*>"#).unwrap()
});
static TARGET_ATTR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\starget=").unwrap());
static REL_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\srel=["']([^"']*)["']"#).unwrap());
static CODE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<pre><code([^>]*)>(.*?)</code></pre>").unwrap());

const REQUIRED_REL: [&str; 2] = ["noopener", "noreferrer"];

/// Render a markdown body into the final page HTML.
pub fn render(markdown: &str) -> String {
    let html = to_html(markdown);
    let html = add_heading_ids(&html);
    let html = harden_external_links(&html);
    wrap_code_blocks(&html)
}

/// Plain GitHub-flavored conversion without any post-processing.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_GFM);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Derive an anchor id from heading text.
///
/// Only ASCII letters, digits, `_`, `-` and whitespace survive; everything
/// else (accented letters included) is dropped before whitespace becomes
/// hyphens. Only whitespace is trimmed from the ends; edge hyphens stay.
///
/// - `"Getting Started!"` → `"getting-started"`
/// - `"API  &  Usage"` → `"api-usage"`
/// - `"Café Menu"` → `"caf-menu"`
/// - `"Hello !"` → `"hello-"`
pub fn heading_id(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = NON_ID_CHARS.replace_all(&lower, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&stripped, "-");
    let collapsed = HYPHEN_RUN.replace_all(&hyphenated, "-");
    collapsed.trim().to_string()
}

/// Inject `id` attributes into headings whose content is plain text.
///
/// Headings that already carry attributes or contain nested markup (links,
/// emphasis, inline code) are left as they are.
pub fn add_heading_ids(html: &str) -> String {
    HEADING
        .replace_all(html, |caps: &Captures| {
            let level = &caps[1];
            let text = &caps[2];
            format!(
                r#"<h{level} id="{id}">{text}</h{level}>"#,
                id = heading_id(text)
            )
        })
        .into_owned()
}

/// Make links to `http://` and `https://` URLs open in a new tab without
/// leaking the opener or the referrer.
pub fn harden_external_links(html: &str) -> String {
    ANCHOR_TAG
        .replace_all(html, |caps: &Captures| {
            let tag = &caps[0];
            if is_external(&caps[1]) {
                harden_anchor(tag)
            } else {
                tag.to_string()
            }
        })
        .into_owned()
}

fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

fn harden_anchor(tag: &str) -> String {
    let mut tag = tag.to_string();

    if !TARGET_ATTR.is_match(&tag) {
        insert_before_close(&mut tag, r#" target="_blank""#);
    }

    let existing_rel = REL_ATTR
        .captures(&tag)
        .map(|caps| (caps.get(0).map(|m| m.range()), caps[1].to_string()));

    match existing_rel {
        Some((Some(range), rel)) => {
            let mut tokens: Vec<&str> = rel.split_whitespace().collect();
            for required in REQUIRED_REL {
                if !tokens.iter().any(|t| t.eq_ignore_ascii_case(required)) {
                    tokens.push(required);
                }
            }
            let merged = format!(r#" rel="{}""#, tokens.join(" "));
            tag.replace_range(range, &merged);
        }
        _ => insert_before_close(&mut tag, r#" rel="noopener noreferrer""#),
    }

    tag
}

/// Insert `attr` just before the closing `>` (or `/>`) of a start tag.
fn insert_before_close(tag: &mut String, attr: &str) {
    let close = if tag.ends_with("/>") {
        tag.len() - 2
    } else {
        tag.len() - 1
    };
    tag.insert_str(close, attr);
}

/// Wrap each `<pre><code>` block in a container with a copy button.
///
/// Code element ids are `code-block-1`, `code-block-2`, … in document order,
/// so rendering the same markdown twice yields identical HTML.
pub fn wrap_code_blocks(html: &str) -> String {
    let mut counter = 0usize;
    CODE_BLOCK
        .replace_all(html, |caps: &Captures| {
            counter += 1;
            let code_id = format!("code-block-{counter}");
            format!(
                concat!(
                    r#"<div class="code-block-wrapper">"#,
                    r##"<button class="copy-code-btn" data-clipboard-target="#{id}" type="button" aria-label="Copy code">"##,
                    r#"<span class="copy-text">Copy</span>"#,
                    "</button>",
                    r#"<pre><code id="{id}"{attrs}>{code}</code></pre>"#,
                    "</div>"
                ),
                id = code_id,
                attrs = &caps[1],
                code = &caps[2],
            )
        })
        .into_owned()
}
