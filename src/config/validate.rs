// src/config/validate.rs

use crate::config::model::ConfigFile;
use crate::errors::{Result, WatcherdError};

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - there is at least one watch section
/// - every watch names a path and a command
///
/// It deliberately does **not** reject unrecognized event tokens or verify
/// that watched paths exist: token typos degrade the mask instead of
/// aborting startup, and path problems are per-watch subscription failures
/// that must not keep other watches from starting.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    if cfg.watch.is_empty() {
        return Err(WatcherdError::Config(
            "config must contain at least one [watch.<name>] section".to_string(),
        ));
    }

    for (name, section) in cfg.watch.iter() {
        if section.watch.as_os_str().is_empty() {
            return Err(WatcherdError::Config(format!(
                "watch '{name}' has an empty `watch` path"
            )));
        }
        if section.command.trim().is_empty() {
            return Err(WatcherdError::Config(format!(
                "watch '{name}' has an empty `command`"
            )));
        }
    }

    Ok(())
}
