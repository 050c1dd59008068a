//! Watch mode: rebuild the site whenever one of its inputs changes.
//!
//! Watched inputs:
//!
//! | Input          | Watched through               | Relevant changes              |
//! |----------------|-------------------------------|-------------------------------|
//! | source dir     | itself, non-recursive         | `.md` documents (not readmes) |
//! | template file  | its directory, non-recursive  | the template path only        |
//! | assets dir     | itself, recursive             | any file, if the dir exists   |
//! | `docgen.toml`  | its directory, non-recursive  | the config path, if it exists |
//!
//! The template and config file are never watched directly: editors that
//! save by writing a temp file and renaming it over the original replace the
//! inode, and a watch on the old inode goes quiet. Watching the directory
//! keeps seeing every later save; [`classify`] drops the sibling events.
//!
//! Notifications arrive from the `notify` backend thread over an mpsc
//! channel. Every relevant event runs a full synchronous build on the
//! calling thread; there is no debouncing. A failed build is reported and
//! the loop keeps waiting for the next change. A config change reloads the
//! config first, and a config that fails to load keeps the previous one.

use crate::config::{self, ConfigError, DocsConfig};
use crate::generate::{self, BuildReport, GenerateError};
use crate::output;
use crate::scan;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Cannot start file watcher: {0}")]
    Notify(#[from] notify::Error),
    #[error("Cannot watch {path}: {source}")]
    Path {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

/// What kind of input a changed path belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    Document(PathBuf),
    Template(PathBuf),
    Asset(PathBuf),
    Config(PathBuf),
}

impl Trigger {
    pub fn path(&self) -> &Path {
        match self {
            Trigger::Document(p) | Trigger::Template(p) | Trigger::Asset(p) | Trigger::Config(p) => p,
        }
    }
}

/// What handling one relevant change led to.
#[derive(Debug)]
pub enum WatchOutcome {
    Rebuilt {
        trigger: Trigger,
        report: BuildReport,
    },
    BuildFailed {
        trigger: Trigger,
        error: GenerateError,
    },
    /// The config file changed but could not be loaded. Nothing was rebuilt
    /// and the previous config stays in effect.
    ConfigRejected {
        trigger: Trigger,
        error: ConfigError,
    },
}

impl WatchOutcome {
    pub fn trigger(&self) -> &Trigger {
        match self {
            WatchOutcome::Rebuilt { trigger, .. }
            | WatchOutcome::BuildFailed { trigger, .. }
            | WatchOutcome::ConfigRejected { trigger, .. } => trigger,
        }
    }
}

/// Absolute paths of everything watch mode listens to.
///
/// Backends report absolute paths, so configured paths are made absolute
/// before comparing.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchTargets {
    pub source_dir: PathBuf,
    pub template: PathBuf,
    pub assets_dir: PathBuf,
    /// `None` when no config file exists.
    pub config_file: Option<PathBuf>,
}

impl WatchTargets {
    pub fn new(config: &DocsConfig, config_path: &Path) -> Self {
        Self {
            source_dir: absolute(&config.paths.source_dir),
            template: absolute(&config.paths.template),
            assets_dir: absolute(&config.paths.assets_dir),
            config_file: config_path.is_file().then(|| absolute(config_path)),
        }
    }

    /// Directories to register with the watcher, each listed once.
    ///
    /// The source dir is always listed. The template and config directories
    /// and the assets dir are listed only if they exist.
    pub fn watched_dirs(&self) -> Vec<(PathBuf, RecursiveMode)> {
        let mut dirs = vec![(self.source_dir.clone(), RecursiveMode::NonRecursive)];
        if self.assets_dir.is_dir() {
            dirs.push((self.assets_dir.clone(), RecursiveMode::Recursive));
        }
        let file_dirs = std::iter::once(&self.template)
            .chain(self.config_file.as_ref())
            .filter_map(|file| file.parent());
        for dir in file_dirs {
            if dir.is_dir() && !dirs.iter().any(|(d, _)| d == dir) {
                dirs.push((dir.to_path_buf(), RecursiveMode::NonRecursive));
            }
        }
        dirs
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Map a changed path to the input it belongs to, or `None` if irrelevant.
pub fn classify(path: &Path, targets: &WatchTargets) -> Option<Trigger> {
    let path = absolute(path);

    if path == targets.template {
        return Some(Trigger::Template(path));
    }
    if targets.config_file.as_ref() == Some(&path) {
        return Some(Trigger::Config(path));
    }
    if path.starts_with(&targets.assets_dir) && path != targets.assets_dir {
        return Some(Trigger::Asset(path));
    }
    if path.parent() == Some(targets.source_dir.as_path()) && scan::is_document(&path) {
        return Some(Trigger::Document(path));
    }
    None
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

fn register(watcher: &mut impl Watcher, targets: &WatchTargets) -> Result<(), WatchError> {
    for (dir, mode) in targets.watched_dirs() {
        watcher
            .watch(&dir, mode)
            .map_err(|source| WatchError::Path { path: dir, source })?;
    }
    Ok(())
}

fn unregister(watcher: &mut impl Watcher, targets: &WatchTargets) {
    // Directories that vanished since registration fail to unwatch; ignore.
    for (dir, _) in targets.watched_dirs() {
        let _ = watcher.unwatch(&dir);
    }
}

fn build(trigger: Trigger, config: &DocsConfig) -> WatchOutcome {
    match generate::generate(config) {
        Ok(report) => WatchOutcome::Rebuilt { trigger, report },
        Err(error) => WatchOutcome::BuildFailed { trigger, error },
    }
}

/// Handle one watcher event.
///
/// Returns `None` when the event is not a create/modify/remove of a watched
/// input. A config change reloads `config` before rebuilding and moves the
/// watches over when the configured paths changed; if the new config cannot
/// be loaded, `config` and `targets` are left untouched.
pub fn handle_event(
    event: &Event,
    config: &mut DocsConfig,
    config_path: &Path,
    targets: &mut WatchTargets,
    watcher: &mut impl Watcher,
) -> Result<Option<WatchOutcome>, WatchError> {
    if !is_relevant(event) {
        return Ok(None);
    }
    let Some(trigger) = event.paths.iter().find_map(|p| classify(p, targets)) else {
        return Ok(None);
    };

    if let Trigger::Config(_) = trigger {
        match config::load_config(config_path) {
            Ok(reloaded) => {
                *config = reloaded;
                let new_targets = WatchTargets::new(config, config_path);
                if new_targets != *targets {
                    unregister(watcher, targets);
                    register(watcher, &new_targets)?;
                    *targets = new_targets;
                }
            }
            Err(error) => return Ok(Some(WatchOutcome::ConfigRejected { trigger, error })),
        }
    }

    Ok(Some(build(trigger, config)))
}

fn print_outcome(outcome: &WatchOutcome) {
    output::print_watch_change(outcome.trigger());
    match outcome {
        WatchOutcome::Rebuilt { report, .. } => output::print_watch_rebuilt(report),
        WatchOutcome::BuildFailed { error, .. } => output::print_watch_failed(error),
        WatchOutcome::ConfigRejected { error, .. } => output::print_watch_config_rejected(error),
    }
}

/// Build once, then rebuild on every relevant change. Blocks until the
/// watcher channel closes.
pub fn watch(config_path: &Path, config: DocsConfig) -> Result<(), WatchError> {
    let mut config = config;
    match generate::generate(&config) {
        Ok(report) => output::print_watch_rebuilt(&report),
        Err(e) => output::print_watch_failed(&e),
    }

    let (tx, rx) = mpsc::channel();
    let mut watcher: RecommendedWatcher = notify::recommended_watcher(tx)?;
    let mut targets = WatchTargets::new(&config, config_path);
    register(&mut watcher, &targets)?;
    output::print_watch_started(&targets);

    for result in rx {
        let event = match result {
            Ok(event) => event,
            Err(e) => {
                output::print_watch_error(&e);
                continue;
            }
        };
        let outcome = handle_event(&event, &mut config, config_path, &mut targets, &mut watcher)?;
        if let Some(outcome) = outcome {
            print_outcome(&outcome);
        }
    }

    Ok(())
}
