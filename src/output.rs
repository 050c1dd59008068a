//! CLI output formatting for the scan, build and watch commands.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every document is its semantic identity (positional index and title)
//! with the source file shown as secondary context on an indented `Source:`
//! line. The output reads as a content inventory while still letting users
//! trace each entry back to a file.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Sections
//! 001 Design System (2 documents)
//!     001 Typography
//!         Source: typography.md
//!     002 Colors
//!         Source: colors.md
//!         Subtitle: Palette and contrast rules
//! 002 Pages (1 document)
//!     001 changelog
//!         Source: changelog.md
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! 001 Colors → colors.html
//! 002 Typography → typography.html
//!
//! Assets: 1 file → assets/
//! Generated 2 pages in docs/site
//! ```
//!
//! ## Watch
//!
//! ```text
//! Watching for changes
//!     Documents: /project/docs/*.md
//!     Template: /project/docs/generator/template.html
//! Changed: /project/docs/colors.md (document)
//! Rebuilt 2 pages in docs/site
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::config::SiteConfig;
use crate::generate::{ASSETS_OUTPUT_DIR, BuildReport};
use crate::nav::{INDEX_PATH, section_label};
use crate::scan::Manifest;
use crate::watch::{Trigger, WatchTargets};
use std::error::Error;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 document`, `3 documents`.
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the scan inventory: sections in display order, documents within.
pub fn format_scan_output(manifest: &Manifest, site: &SiteConfig) -> Vec<String> {
    let mut lines = vec!["Sections".to_string()];

    let sections = manifest
        .sections
        .ordered(&site.section_order, site.default_order);
    if sections.is_empty() {
        lines.push(format!(
            "{}(no documents in {})",
            indent(1),
            manifest.source_dir.display()
        ));
        return lines;
    }

    for (i, section) in sections.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            section_label(section.name),
            plural(section.documents.len(), "document")
        ));
        for (j, doc) in section.documents.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(j + 1), doc.title));
            lines.push(format!("{}Source: {}", indent(2), doc.filename));
            if let Some(subtitle) = doc.meta("subtitle") {
                lines.push(format!("{}Subtitle: {}", indent(2), truncate(subtitle, 60)));
            }
        }
    }

    lines
}

pub fn print_scan_output(manifest: &Manifest, site: &SiteConfig) {
    print_lines(format_scan_output(manifest, site));
}

// ============================================================================
// Build output
// ============================================================================

/// Format the build report: one line per written page, then a summary.
pub fn format_generate_output(report: &BuildReport) -> Vec<String> {
    let mut lines = vec![format!("Home \u{2192} {INDEX_PATH}")];

    for (i, page) in report.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(i + 1),
            page.title,
            page.path
        ));
    }

    lines.push(String::new());
    if report.assets_copied > 0 {
        lines.push(format!(
            "Assets: {} \u{2192} {}/",
            plural(report.assets_copied, "file"),
            ASSETS_OUTPUT_DIR
        ));
    }
    lines.push(format!(
        "Generated {} in {}",
        plural(report.pages.len(), "page"),
        report.output_dir.display()
    ));

    lines
}

pub fn print_generate_output(report: &BuildReport) {
    print_lines(format_generate_output(report));
}

// ============================================================================
// Watch output
// ============================================================================

pub fn format_watch_started(targets: &WatchTargets) -> Vec<String> {
    let mut lines = vec![
        "Watching for changes".to_string(),
        format!("{}Documents: {}/*.md", indent(1), targets.source_dir.display()),
        format!("{}Template: {}", indent(1), targets.template.display()),
    ];
    if targets.assets_dir.is_dir() {
        lines.push(format!("{}Assets: {}/", indent(1), targets.assets_dir.display()));
    }
    if let Some(config_file) = &targets.config_file {
        lines.push(format!("{}Config: {}", indent(1), config_file.display()));
    }
    lines.push("Press Ctrl+C to stop".to_string());
    lines
}

pub fn format_watch_change(trigger: &Trigger) -> Vec<String> {
    let kind = match trigger {
        Trigger::Document(_) => "document",
        Trigger::Template(_) => "template",
        Trigger::Asset(_) => "asset",
        Trigger::Config(_) => "config",
    };
    vec![format!("Changed: {} ({kind})", trigger.path().display())]
}

pub fn format_watch_rebuilt(report: &BuildReport) -> Vec<String> {
    vec![format!(
        "Rebuilt {} in {}",
        plural(report.pages.len(), "page"),
        report.output_dir.display()
    )]
}

/// A failed build, with its cause chain.
pub fn format_watch_failed(err: &dyn Error) -> Vec<String> {
    let mut lines = vec![format!("Build failed: {err}")];
    let mut source = err.source();
    while let Some(cause) = source {
        lines.push(format!("{}caused by: {cause}", indent(1)));
        source = cause.source();
    }
    lines
}

/// A config file that changed but failed to load.
pub fn format_watch_config_rejected(err: &dyn Error) -> Vec<String> {
    vec![
        format!("Config not reloaded: {err}"),
        format!("{}keeping the previous config", indent(1)),
    ]
}

pub fn format_watch_error(err: &dyn Error) -> Vec<String> {
    vec![format!("Watch error: {err}")]
}

pub fn print_watch_started(targets: &WatchTargets) {
    print_lines(format_watch_started(targets));
}

pub fn print_watch_change(trigger: &Trigger) {
    print_lines(format_watch_change(trigger));
}

pub fn print_watch_rebuilt(report: &BuildReport) {
    print_lines(format_watch_rebuilt(report));
}

pub fn print_watch_failed(err: &dyn Error) {
    print_lines(format_watch_failed(err));
}

pub fn print_watch_config_rejected(err: &dyn Error) {
    print_lines(format_watch_config_rejected(err));
}

pub fn print_watch_error(err: &dyn Error) {
    print_lines(format_watch_error(err));
}

// ============================================================================
// Tests
// ============================================================================
