//! Generator configuration.
//!
//! Settings live in an optional `docgen.toml`. Stock defaults reproduce the
//! classic layout where the generator sits next to the documents it renders:
//!
//! ```text
//! docs/
//! ├── getting-started.md       # Source documents (flat, non-recursive)
//! ├── README.md                # Ignored
//! ├── generator/
//! │   ├── template.html        # Single page template
//! │   └── assets/              # Watched; optionally copied to site/assets
//! └── site/                    # Output
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! [paths]
//! source_dir = "docs"
//! output_dir = "docs/site"
//! template = "docs/generator/template.html"
//! assets_dir = "docs/generator/assets"
//!
//! [site]
//! index_title = "Documentation"
//! index_description = "Complete documentation"
//! hero_description = "Complete documentation for your project."
//! fallback_title = "Untitled"
//! default_section = "uncategorized"
//! default_order = 999
//! section_order = ["Design System", "Code", "Content", "Project"]
//! copy_assets = false
//! ```
//!
//! The file is sparse: the user's values are merged over the stock defaults,
//! so only overridden keys need to be present. Unknown keys are rejected to
//! catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "docgen.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsConfig {
    /// Where documents, the template and assets are read from and pages written to.
    pub paths: PathsConfig,
    /// Presentation settings for generated pages.
    pub site: SiteConfig,
}

/// Filesystem locations. Relative paths resolve against the working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Flat directory of markdown documents.
    pub source_dir: PathBuf,
    /// Directory receiving the generated HTML. Created if absent.
    pub output_dir: PathBuf,
    /// HTML template with `{{PLACEHOLDER}}` slots.
    pub template: PathBuf,
    /// Static assets. Watched for changes, copied only when `site.copy_assets` is set.
    pub assets_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("docs"),
            output_dir: PathBuf::from("docs/site"),
            template: PathBuf::from("docs/generator/template.html"),
            assets_dir: PathBuf::from("docs/generator/assets"),
        }
    }
}

/// Page content settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// `<title>` of the index page.
    pub index_title: String,
    /// Meta description of the index page.
    pub index_description: String,
    /// Paragraph under the index page heading.
    pub hero_description: String,
    /// Page title for documents without a `title` key.
    pub fallback_title: String,
    /// Section for documents without a `section` key.
    pub default_section: String,
    /// Sort position for documents without a numeric `order` key.
    pub default_order: f64,
    /// Sections listed first, in this order. Others follow alphabetically.
    pub section_order: Vec<String>,
    /// Copy `paths.assets_dir` into `<output_dir>/assets` on every build.
    pub copy_assets: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            index_title: "Documentation".to_string(),
            index_description: "Complete documentation".to_string(),
            hero_description: "Complete documentation for your project.".to_string(),
            fallback_title: "Untitled".to_string(),
            default_section: "uncategorized".to_string(),
            default_order: 999.0,
            section_order: ["Design System", "Code", "Content", "Project"]
                .into_iter()
                .map(String::from)
                .collect(),
            copy_assets: false,
        }
    }
}

impl DocsConfig {
    /// Validate that required values are present and consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let paths = [
            ("paths.source_dir", &self.paths.source_dir),
            ("paths.output_dir", &self.paths.output_dir),
            ("paths.template", &self.paths.template),
            ("paths.assets_dir", &self.paths.assets_dir),
        ];
        for (key, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.paths.output_dir == self.paths.source_dir {
            return Err(ConfigError::Validation(
                "paths.output_dir must differ from paths.source_dir".into(),
            ));
        }
        if self.site.default_section.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.default_section must not be empty".into(),
            ));
        }
        if !self.site.default_order.is_finite() {
            return Err(ConfigError::Validation(
                "site.default_order must be a finite number".into(),
            ));
        }
        let mut seen = HashSet::new();
        for section in &self.site.section_order {
            if !seen.insert(section.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "site.section_order lists '{section}' more than once"
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(DocsConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge user values over the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<DocsConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: DocsConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`.
///
/// A missing file is not an error: the stock defaults are used.
pub fn load_config(path: &Path) -> Result<DocsConfig, ConfigError> {
    let overlay = if path.exists() {
        let content = fs::read_to_string(path)?;
        Some(toml::from_str::<toml::Value>(&content)?)
    } else {
        None
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock `docgen.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# docgen configuration
# ====================
# All settings are optional. Values shown below are the defaults.
# Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Paths (relative to the directory docgen runs in)
# ---------------------------------------------------------------------------
[paths]
# Flat folder of markdown documents. README* files are skipped.
source_dir = "docs"

# Where the HTML pages are written. Created if missing.
output_dir = "docs/site"

# Page template. Placeholders: {{PAGE_TITLE}}, {{META_DESCRIPTION}},
# {{PAGE_HEADER}}, {{PAGE_CONTENT}}, {{NAVIGATION}}, {{TOC_SECTION}},
# {{INDEX_PATH}}.
template = "docs/generator/template.html"

# Static assets. Watch mode rebuilds when they change.
assets_dir = "docs/generator/assets"

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
index_title = "Documentation"
index_description = "Complete documentation"
hero_description = "Complete documentation for your project."

# Title used for documents without a `title` frontmatter key.
fallback_title = "Untitled"

# Section used for documents without a `section` frontmatter key.
default_section = "uncategorized"

# Sort position for documents without a numeric `order` key.
default_order = 999

# Sections shown first, in this order. Any other section follows alphabetically.
section_order = ["Design System", "Code", "Content", "Project"]

# Copy assets_dir into <output_dir>/assets on every build.
copy_assets = false
"##
}
