// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::ConfigFile;
use crate::config::validate::validate_config;
use crate::errors::{Result, WatcherdError};

/// Load a configuration file from a given path.
///
/// This only performs TOML deserialization; use [`load_and_validate`] to
/// also run the semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        WatcherdError::Config(format!("reading config file at {path:?}: {e}"))
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| {
        WatcherdError::Config(format!("parsing TOML config from {path:?}: {e}"))
    })?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
///
/// This is the entry point used by the rest of the application.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let config = load_from_path(&path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Resolve the config file path: an explicit `-c` value wins, otherwise the
/// first existing default location.
///
/// Default locations, in order: `/etc/watcherd.toml`, `~/.watcherd.toml`.
pub fn resolve_config_path(cli_override: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = cli_override {
        return Ok(path.to_path_buf());
    }

    for candidate in default_config_paths() {
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(WatcherdError::Config(
        "no config file found; try the -c parameter".to_string(),
    ))
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/watcherd.toml")];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".watcherd.toml"));
    }
    paths
}
