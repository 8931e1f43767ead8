// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Unknown subcommands are rejected by clap itself, which exits with
//! code 2, matching the documented CLI contract.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `watcherd`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "watcherd",
    version,
    about = "Monitor directories for changes and run commands on these changes.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Defaults: `/etc/watcherd.toml`, then `~/.watcherd.toml`.
    #[arg(short = 'c', long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WATCHERD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: DaemonCommand,
}

/// What to do with the daemon.
#[derive(Debug, Copy, Clone, Subcommand)]
pub enum DaemonCommand {
    /// Start the daemon in the background.
    Start,
    /// Stop a running daemon.
    Stop,
    /// Stop the daemon, then start it again.
    Restart,
    /// Report whether the daemon is running.
    Status,
    /// Run in the foreground without daemonizing.
    Debug,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The flag value form, for re-passing to a spawned daemon process.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
