// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::engine::WatchSpec;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [default]
/// logfile = "/tmp/watcherd.log"
/// pidfile = "/tmp/watcherd.pid"
///
/// [watch.docs]
/// watch = "/home/user/Documents"
/// events = "create,delete,modify"
/// recursive = true
/// autoadd = true
/// excluded = ""
/// command = "echo ${filename}"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// Process-wide paths from `[default]`.
    #[serde(default)]
    pub default: DefaultSection,

    /// All watches from `[watch.<name>]`, keyed by section name.
    #[serde(default)]
    pub watch: BTreeMap<String, WatchSection>,
}

impl ConfigFile {
    /// Map the config sections into the immutable specs the dispatch
    /// engine consumes.
    pub fn watch_specs(&self) -> Vec<WatchSpec> {
        self.watch
            .iter()
            .map(|(name, section)| WatchSpec {
                name: name.clone(),
                path: section.watch.clone(),
                recursive: section.recursive,
                auto_add: section.autoadd,
                exclude_patterns: split_list(&section.excluded),
                event_names: split_list(&section.events),
                command_template: section.command.clone(),
            })
            .collect()
    }
}

/// `[default]` section: paths consumed by the daemonization layer only.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultSection {
    #[serde(default = "default_logfile")]
    pub logfile: PathBuf,

    #[serde(default = "default_pidfile")]
    pub pidfile: PathBuf,
}

fn default_logfile() -> PathBuf {
    PathBuf::from("/tmp/watcherd.log")
}

fn default_pidfile() -> PathBuf {
    PathBuf::from("/tmp/watcherd.pid")
}

impl Default for DefaultSection {
    fn default() -> Self {
        Self {
            logfile: default_logfile(),
            pidfile: default_pidfile(),
        }
    }
}

/// `[watch.<name>]` section.
///
/// `events` and `excluded` are comma-separated lists; `excluded` may be
/// blank for no filtering.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Directory to monitor.
    pub watch: PathBuf,

    /// Comma-separated event-name tokens, e.g. `"create,delete,move"`.
    pub events: String,

    /// Watch the whole tree below `watch`.
    #[serde(default)]
    pub recursive: bool,

    /// Subscribe newly created subdirectories automatically.
    #[serde(default)]
    pub autoadd: bool,

    /// Comma-separated regex patterns; events on matching paths are
    /// discarded and matching directories are never watched.
    #[serde(default)]
    pub excluded: String,

    /// Command template with `${watched}`, `${filename}`, `${tflags}`,
    /// `${nflags}`, `${cookie}` placeholders.
    pub command: String,
}

/// Split a comma-separated config value, dropping blank entries.
fn split_list(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
