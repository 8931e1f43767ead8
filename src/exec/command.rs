// src/exec/command.rs

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

/// Trait abstracting where expanded command lines go.
///
/// Production code uses [`ShellSink`]; tests can provide their own
/// implementation that records commands instead of spawning processes.
pub trait CommandSink: Send + Sync {
    /// Launch the given command line.
    ///
    /// Implementations report only whether the launch succeeded; dispatch
    /// is fire-and-forget and nothing waits for the command to complete.
    fn run(
        &self,
        command: String,
    ) -> Pin<Box<dyn Future<Output = std::io::Result<()>> + Send + '_>>;
}

/// Real execution sink: spawns `sh -c <command>` and lets it run.
///
/// The child inherits stdout/stderr, so in daemon mode command output lands
/// in the logfile just like the daemon's own output. A detached task reaps
/// the child to keep zombies from accumulating.
#[derive(Debug, Clone, Default)]
pub struct ShellSink;

impl CommandSink for ShellSink {
    fn run(
        &self,
        command: String,
    ) -> Pin<Box<dyn Future<Output = std::io::Result<()>> + Send + '_>> {
        Box::pin(async move {
            let mut child = Command::new("sh")
                .arg("-c")
                .arg(&command)
                .stdin(Stdio::null())
                .spawn()?;

            tokio::spawn(async move {
                match child.wait().await {
                    Ok(status) => {
                        debug!(exit_code = ?status.code(), "command exited");
                    }
                    Err(e) => {
                        debug!(error = %e, "failed to reap command");
                    }
                }
            });

            Ok(())
        })
    }
}
