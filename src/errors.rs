// src/errors.rs

//! Crate-wide error types.
//!
//! The variants mirror how failures propagate through the daemon:
//! `Config` and `Subscription` abort the setup of a single watch,
//! `Template` and `Execution` abort a single event dispatch, and nothing
//! crosses from one watch binding into another.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatcherdError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("cannot subscribe to {path:?}: {reason}")]
    Subscription { path: PathBuf, reason: String },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("failed to spawn command `{command}`: {source}")]
    Execution {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("daemon already running (pidfile {0:?})")]
    AlreadyRunning(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure while expanding a command template against an event.
///
/// These are reported per event and never tear down the watch loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown placeholder `${{{0}}}` in command template")]
    UnknownPlaceholder(String),

    #[error("unterminated `${{` in command template")]
    Unterminated,
}

pub type Result<T> = std::result::Result<T, WatcherdError>;
