//! # docgen
//!
//! A small static documentation generator. A flat folder of markdown files
//! with optional frontmatter becomes a set of HTML pages sharing one
//! template, plus an index page listing every document by section.
//!
//! # Architecture: Scan, Then Generate
//!
//! ```text
//! 1. Scan      docs/*.md  →  Manifest       (parse frontmatter, render markdown, group)
//! 2. Generate  Manifest   →  docs/site/     (compose pages into the template)
//! ```
//!
//! Each build runs both stages from scratch, single-threaded. The output is
//! a pure function of the sources, template and config, so two builds from
//! unchanged inputs produce byte-identical files. Watch mode reruns the same
//! build on every relevant change.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`frontmatter`] | Splits a `---` fenced key/value header from the markdown body |
//! | [`markdown`] | Markdown → HTML with heading ids, hardened external links and copyable code blocks |
//! | [`toc`] | "On this page" outline from the rendered headings |
//! | [`nav`] | Sidebar navigation: home link plus one group per section |
//! | [`compose`] | Fills the page template for document pages and the index |
//! | [`scan`] | Stage 1: discovers and parses the source documents |
//! | [`generate`] | Stage 2: writes the site |
//! | [`watch`] | Rebuilds on source, template, asset or config changes |
//! | [`config`] | `docgen.toml` loading, merging over stock defaults, validation |
//! | [`types`] | `Document` and section grouping shared by the stages |
//! | [`output`] | CLI output formatting |
//! | [`page_script`] | Landing page behaviors over an abstract browser [`page_script::Platform`] |
//!
//! # Design Decisions
//!
//! ## Maud for Generated Markup
//!
//! Navigation, the table of contents, page headers and the index cards are
//! built with [Maud](https://maud.lambda.xyz/), so every title and subtitle
//! from frontmatter is escaped. The page template itself stays a plain HTML
//! file owned by the docs authors; its `{{PLACEHOLDER}}` slots are filled
//! verbatim.
//!
//! ## Deterministic Ids
//!
//! Heading ids are derived from the heading text and code-block ids count
//! from 1 in each document, so rebuilding never churns the output.
//!
//! ## Config Over Flags
//!
//! All paths and site text live in an optional `docgen.toml`, merged over
//! stock defaults. The CLI only selects the command and the config file.

pub mod compose;
pub mod config;
pub mod frontmatter;
pub mod generate;
pub mod markdown;
pub mod nav;
pub mod output;
pub mod page_script;
pub mod scan;
pub mod toc;
pub mod types;
pub mod watch;

#[cfg(test)]
pub(crate) mod test_helpers;
