//! Shared test utilities for the docgen test suite.
//!
//! Provides fixture setup, a document builder, and lookup helpers that work
//! with scan-stage data structures (`Manifest`, `Document`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path(), &SiteConfig::default()).unwrap();
//!
//! let voice = find_document(&manifest, "voice.md");
//! assert_eq!(voice.title, "Voice and Tone");
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::config::DocsConfig;
use crate::frontmatter::Frontmatter;
use crate::scan::Manifest;
use crate::types::Document;

/// The fixture page template.
pub const TEMPLATE: &str = include_str!("../fixtures/docs/generator/template.html");

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/docs/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/docs");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Config pointing at a fixture copy, with output in `<tmp>/site`.
pub fn fixture_config(tmp: &TempDir) -> DocsConfig {
    let root = tmp.path();
    let mut config = DocsConfig::default();
    config.paths.source_dir = root.to_path_buf();
    config.paths.output_dir = root.join("site");
    config.paths.template = root.join("generator/template.html");
    config.paths.assets_dir = root.join("generator/assets");
    config
}

/// Every file under `<tmp>/site`, sorted.
pub fn output_files(tmp: &TempDir) -> Vec<PathBuf> {
    WalkDir::new(tmp.path().join("site"))
        .sort_by_file_name()
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}

// =========================================================================
// Document builder
// =========================================================================

/// A parsed document with `title`, `section` and optional `order` frontmatter.
pub fn doc(filename: &str, title: &str, section: &str, order: Option<&str>) -> Document {
    let stem = filename.trim_end_matches(".md").to_string();
    let mut frontmatter = Frontmatter::new();
    frontmatter.insert("title".into(), title.into());
    frontmatter.insert("section".into(), section.into());
    if let Some(order) = order {
        frontmatter.insert("order".into(), order.into());
    }

    Document {
        filename: filename.to_string(),
        html_path: format!("{stem}.html"),
        markdown_path: filename.to_string(),
        stem,
        title: title.to_string(),
        section: section.to_string(),
        source_path: PathBuf::from("docs").join(filename),
        frontmatter,
        body: format!("Body of {title}."),
        html: format!("<p>Body of {title}.</p>\n"),
    }
}

// =========================================================================
// Manifest lookups (panic with a clear message on miss)
// =========================================================================

/// All document file names, sorted.
pub fn document_filenames(manifest: &Manifest) -> Vec<&str> {
    let mut names: Vec<&str> = manifest
        .sections
        .documents()
        .map(|d| d.filename.as_str())
        .collect();
    names.sort_unstable();
    names
}

/// Find a document by file name. Panics if not found.
pub fn find_document<'a>(manifest: &'a Manifest, filename: &str) -> &'a Document {
    manifest
        .sections
        .documents()
        .find(|d| d.filename == filename)
        .unwrap_or_else(|| {
            let names = document_filenames(manifest);
            panic!("document '{filename}' not found. Available: {names:?}")
        })
}
