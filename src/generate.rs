//! HTML site generation.
//!
//! Turns the markdown documents of the source directory into a static site:
//! reads the shared template, scans the sources, then writes the index page
//! followed by one page per document. Every run regenerates everything.
//!
//! ## Output Structure
//!
//! ```text
//! docs/site/
//! ├── index.html             # Card grid of all documents, by section
//! ├── colors.html            # One page per source document
//! ├── getting-started.html
//! └── assets/                # Copy of the assets dir (if `copy_assets`)
//!     └── style.css
//! ```
//!
//! Pages link their markdown source as `../<file>.md`, so the output
//! directory is expected to sit one level below the sources.
//!
//! Output is a pure function of the inputs: generating twice from unchanged
//! sources produces byte-identical files.

use crate::compose;
use crate::config::DocsConfig;
use crate::nav::INDEX_PATH;
use crate::scan::{self, ScanError};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Cannot read template {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot copy assets from {path}: {source}")]
    Assets {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of one generation run.
#[derive(Debug, Serialize)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    /// Document pages in the order they were written.
    pub pages: Vec<WrittenPage>,
    /// Number of files copied from the assets directory.
    pub assets_copied: usize,
}

#[derive(Debug, Serialize)]
pub struct WrittenPage {
    pub title: String,
    /// Source file name, e.g. `colors.md`.
    pub source: String,
    /// Output path relative to the output directory.
    pub path: String,
}

/// Directory inside the output dir that receives the assets copy.
pub const ASSETS_OUTPUT_DIR: &str = "assets";

/// Run a full build as described by `config`.
pub fn generate(config: &DocsConfig) -> Result<BuildReport, GenerateError> {
    let paths = &config.paths;
    let site = &config.site;

    let template = fs::read_to_string(&paths.template).map_err(|source| GenerateError::Template {
        path: paths.template.clone(),
        source,
    })?;

    let manifest = scan::scan(&paths.source_dir, site)?;

    fs::create_dir_all(&paths.output_dir).map_err(|source| GenerateError::Write {
        path: paths.output_dir.clone(),
        source,
    })?;

    let assets_copied = if site.copy_assets && paths.assets_dir.is_dir() {
        copy_assets(
            &paths.assets_dir,
            &paths.output_dir.join(ASSETS_OUTPUT_DIR),
        )?
    } else {
        0
    };

    let index_html = compose::index_page(&template, &manifest.sections, site);
    write_page(&paths.output_dir.join(INDEX_PATH), &index_html)?;

    // Pages are written section by section, in scan order within a section.
    let mut pages = Vec::new();
    for doc in manifest.sections.documents() {
        let page_html = compose::document_page(&template, doc, &manifest.sections, site);
        write_page(&paths.output_dir.join(&doc.html_path), &page_html)?;
        pages.push(WrittenPage {
            title: doc.title.clone(),
            source: doc.filename.clone(),
            path: doc.html_path.clone(),
        });
    }

    Ok(BuildReport {
        output_dir: paths.output_dir.clone(),
        pages,
        assets_copied,
    })
}

fn write_page(path: &Path, html: &str) -> Result<(), GenerateError> {
    fs::write(path, html).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Copy `src` recursively into `dst`, returning the number of files copied.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let assets_error = |source: io::Error| GenerateError::Assets {
        path: src.to_path_buf(),
        source,
    };

    let mut copied = 0;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry.map_err(|e| assets_error(e.into()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| assets_error(io::Error::other(e)))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(assets_error)?;
        } else {
            fs::copy(entry.path(), &target).map_err(assets_error)?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn read(path: PathBuf) -> String {
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
    }

    #[test]
    fn writes_index_and_one_page_per_document() {
        let tmp = setup_fixtures();
        let config = fixture_config(&tmp);
        let report = generate(&config).unwrap();

        let site = tmp.path().join("site");
        assert!(site.join("index.html").is_file());
        for page in &report.pages {
            assert!(site.join(&page.path).is_file(), "{} missing", page.path);
        }
        assert_eq!(report.pages.len(), 6);
        assert!(site.join("getting-started.html").is_file());
        assert!(!site.join("README.html").exists());
    }

    #[test]
    fn pages_are_filled_from_template() {
        let tmp = setup_fixtures();
        generate(&fixture_config(&tmp)).unwrap();

        let page = read(tmp.path().join("site/voice.html"));
        assert!(page.contains("<title>Voice and Tone</title>"));
        assert!(page.contains(r#"href="../voice.md""#));
        assert!(page.contains("docs-toc"));
        assert!(!page.contains("{{"));

        let index = read(tmp.path().join("site/index.html"));
        assert!(index.contains("<title>Documentation</title>"));
        assert!(index.contains("docs-card"));
        assert!(!index.contains("{{"));
    }

    #[test]
    fn generation_is_idempotent() {
        let tmp = setup_fixtures();
        let config = fixture_config(&tmp);

        generate(&config).unwrap();
        let first: Vec<String> = output_files(&tmp).into_iter().map(read).collect();
        generate(&config).unwrap();
        let second: Vec<String> = output_files(&tmp).into_iter().map(read).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn missing_template_is_fatal() {
        let tmp = setup_fixtures();
        let mut config = fixture_config(&tmp);
        config.paths.template = tmp.path().join("nope.html");

        let result = generate(&config);
        assert!(matches!(result, Err(GenerateError::Template { .. })));
        assert!(!tmp.path().join("site").exists());
    }

    #[test]
    fn missing_source_dir_is_fatal() {
        let tmp = setup_fixtures();
        let mut config = fixture_config(&tmp);
        config.paths.source_dir = tmp.path().join("missing");

        let result = generate(&config);
        assert!(matches!(
            result,
            Err(GenerateError::Scan(ScanError::SourceDir { .. }))
        ));
    }

    #[test]
    fn output_dir_is_created_recursively() {
        let tmp = setup_fixtures();
        let mut config = fixture_config(&tmp);
        config.paths.output_dir = tmp.path().join("deep/nested/site");

        generate(&config).unwrap();
        assert!(tmp.path().join("deep/nested/site/index.html").is_file());
    }

    #[test]
    fn assets_not_copied_by_default() {
        let tmp = setup_fixtures();
        let report = generate(&fixture_config(&tmp)).unwrap();

        assert_eq!(report.assets_copied, 0);
        assert!(!tmp.path().join("site/assets").exists());
    }

    #[test]
    fn assets_copied_when_enabled() {
        let tmp = setup_fixtures();
        let mut config = fixture_config(&tmp);
        config.site.copy_assets = true;

        let report = generate(&config).unwrap();
        assert_eq!(report.assets_copied, 1);
        assert!(tmp.path().join("site/assets/style.css").is_file());
    }

    #[test]
    fn empty_source_dir_still_writes_index() {
        let tmp = TempDir::new().unwrap();
        let template = tmp.path().join("template.html");
        fs::write(&template, TEMPLATE).unwrap();
        let src = tmp.path().join("docs");
        fs::create_dir(&src).unwrap();

        let mut config = DocsConfig::default();
        config.paths.source_dir = src.clone();
        config.paths.output_dir = src.join("site");
        config.paths.template = template;

        let report = generate(&config).unwrap();
        assert!(report.pages.is_empty());
        assert!(src.join("site/index.html").is_file());
    }
}
