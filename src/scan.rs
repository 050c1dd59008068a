//! Source discovery and document parsing.
//!
//! First stage of a build. Lists the markdown files directly inside the
//! source directory, parses each one (frontmatter, then markdown) and groups
//! the results by section.
//!
//! ## What counts as a document
//!
//! ```text
//! docs/
//! ├── colors.md        # document
//! ├── shared.md        # document, also when it is a symlink to a file
//! ├── Typography.MD    # skipped: the extension must be exactly `md`
//! ├── README.md        # skipped: readme
//! ├── README-dev.md    # skipped: readme
//! ├── notes.txt        # skipped: not markdown
//! ├── generator/       # skipped: directories are never entered
//! └── site/            # skipped
//! ```
//!
//! Files are visited in file-name order so that a build is reproducible
//! regardless of the order the filesystem returns entries in. Any file that
//! cannot be read aborts the scan.

use crate::config::SiteConfig;
use crate::frontmatter;
use crate::markdown;
use crate::types::{Document, SectionGroups};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read source directory {path}: {source}")]
    SourceDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("Cannot read document {path}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Output of the scan stage.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub source_dir: PathBuf,
    /// Document file names in scan order.
    pub documents: Vec<String>,
    /// Documents grouped by section.
    pub sections: SectionGroups,
}

const MARKDOWN_EXTENSION: &str = "md";
const README_PREFIX: &str = "README";

/// Scan `source_dir` and parse every document in it.
pub fn scan(source_dir: &Path, site: &SiteConfig) -> Result<Manifest, ScanError> {
    let mut documents = Vec::new();
    let mut sections = SectionGroups::default();

    for path in document_paths(source_dir)? {
        let content = fs::read_to_string(&path).map_err(|source| ScanError::Document {
            path: path.clone(),
            source,
        })?;
        let document = parse_document(&path, &content, site);
        documents.push(document.filename.clone());
        sections.push(document);
    }

    Ok(Manifest {
        source_dir: source_dir.to_path_buf(),
        documents,
        sections,
    })
}

/// Markdown files directly inside `dir`, sorted by file name.
///
/// Symlinks are followed: a link to a markdown file is a document, a link to
/// a directory is skipped like any other directory.
pub fn document_paths(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut paths = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|source| ScanError::SourceDir {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && is_document(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

/// Whether a file name marks a source document: markdown and not a readme.
pub fn is_document(path: &Path) -> bool {
    let is_markdown = path
        .extension()
        .is_some_and(|ext| ext == MARKDOWN_EXTENSION);
    let is_readme = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with(README_PREFIX));
    is_markdown && !is_readme
}

/// Build a [`Document`] from a file's path and contents.
pub fn parse_document(path: &Path, content: &str, site: &SiteConfig) -> Document {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let parsed = frontmatter::parse(content);
    let non_empty = |key: &str| {
        parsed
            .frontmatter
            .get(key)
            .filter(|v| !v.is_empty())
            .cloned()
    };
    let title = non_empty("title").unwrap_or_else(|| stem.clone());
    let section = non_empty("section").unwrap_or_else(|| site.default_section.clone());
    let html = markdown::render(&parsed.body);

    Document {
        html_path: format!("{stem}.html"),
        markdown_path: filename.clone(),
        filename,
        stem,
        title,
        section,
        source_path: path.to_path_buf(),
        frontmatter: parsed.frontmatter,
        body: parsed.body,
        html,
    }
}
