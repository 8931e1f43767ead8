// src/engine/supervisor.rs

use std::sync::Arc;

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::engine::binding::{ConfiguredBinding, WatchSpec};
use crate::errors::{Result, WatcherdError};
use crate::exec::command::CommandSink;

/// Owns every watch binding's loop for the process lifetime.
///
/// Bindings start independently: one watch failing to configure or
/// subscribe is logged and abandoned without stopping the others. Shutdown
/// fans out over a `watch` channel that every loop selects on.
pub struct DispatchSupervisor {
    shutdown: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl DispatchSupervisor {
    /// Drive every spec through configure → subscribe → running loop.
    ///
    /// Partial startup is acceptable; it is an error only if no watch at
    /// all could be started.
    pub fn start(specs: Vec<WatchSpec>, sink: Arc<dyn CommandSink>) -> Result<Self> {
        let (shutdown, _) = watch::channel(false);
        let mut handles = Vec::new();

        for spec in specs {
            let name = spec.name.clone();

            let binding = match ConfiguredBinding::configure(spec).and_then(|b| b.subscribe()) {
                Ok(binding) => binding,
                Err(e) => {
                    error!(watch = %name, error = %e, "failed to start watch");
                    continue;
                }
            };

            let rx = shutdown.subscribe();
            let sink = Arc::clone(&sink);
            handles.push(tokio::spawn(binding.run(rx, sink)));
        }

        if handles.is_empty() {
            return Err(WatcherdError::Config(
                "no watches could be started".to_string(),
            ));
        }

        info!(watches = handles.len(), "dispatch supervisor started");
        Ok(Self { shutdown, handles })
    }

    /// Number of watch loops started.
    pub fn active(&self) -> usize {
        self.handles.len()
    }

    /// Block until a termination signal arrives (or every loop has ended on
    /// its own), then stop all bindings and release their subscriptions.
    pub async fn run(self) -> Result<()> {
        let mut terminate = signal(SignalKind::terminate())?;

        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                if let Err(e) = res {
                    error!(error = %e, "failed to listen for SIGINT");
                }
                info!("received interrupt, shutting down");
            }
            _ = terminate.recv() => {
                info!("received SIGTERM, shutting down");
            }
            _ = self.shutdown.closed() => {
                info!("all watch loops ended");
            }
        }

        self.stop().await
    }

    /// Signal every loop to exit and wait for them to finish.
    ///
    /// Events still queued when the signal lands are not guaranteed to be
    /// processed; dropping the bindings releases their kernel watches.
    pub async fn stop(self) -> Result<()> {
        let _ = self.shutdown.send(true);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "watch loop panicked");
            }
        }

        info!("all watch subscriptions released");
        Ok(())
    }
}
