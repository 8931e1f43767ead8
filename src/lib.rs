// src/lib.rs

pub mod cli;
pub mod config;
pub mod daemon;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod watch;

use std::sync::Arc;

use tracing::info;

use crate::config::ConfigFile;
use crate::engine::DispatchSupervisor;
use crate::errors::Result;
use crate::exec::ShellSink;

/// High-level entry point used by `main.rs`.
///
/// Runs the dispatch engine in the foreground: builds one watch spec per
/// config section, starts the supervisor (partial startup allowed), and
/// blocks until a termination signal shuts everything down.
pub async fn run(cfg: ConfigFile) -> Result<()> {
    let specs = cfg.watch_specs();

    info!("daemon started");
    for spec in &specs {
        info!(watch = %spec.name, path = %spec.path.display(), "configured watch");
    }

    let supervisor = DispatchSupervisor::start(specs, Arc::new(ShellSink))?;
    supervisor.run().await
}
