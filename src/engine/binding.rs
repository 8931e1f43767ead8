// src/engine/binding.rs

use std::path::PathBuf;
use std::sync::Arc;

use inotify::WatchMask;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::errors::{Result, WatcherdError};
use crate::exec::command::CommandSink;
use crate::exec::template;
use crate::watch::event::FileEvent;
use crate::watch::exclude::ExcludeFilter;
use crate::watch::mask;
use crate::watch::subscription::Subscription;

/// One declarative watch, as produced by the configuration layer.
///
/// Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct WatchSpec {
    /// Config section name, unique per watch.
    pub name: String,
    /// Directory to monitor.
    pub path: PathBuf,
    /// Watch the whole directory tree below `path`.
    pub recursive: bool,
    /// Automatically subscribe directories created while watching.
    pub auto_add: bool,
    /// Regex patterns suppressing events on matching paths.
    pub exclude_patterns: Vec<String>,
    /// Event-name tokens composing the interest mask.
    pub event_names: Vec<String>,
    /// Command template with `${...}` placeholders.
    pub command_template: String,
}

/// A watch whose mask and exclusion filter have been resolved, but which
/// has no kernel subscription yet.
#[derive(Debug)]
pub struct ConfiguredBinding {
    spec: WatchSpec,
    mask: WatchMask,
    exclude: ExcludeFilter,
}

impl ConfiguredBinding {
    /// Resolve the interest mask and compile the exclusion filter.
    ///
    /// A mask with no recognized event token is refused here: the kernel
    /// rejects an empty mask anyway, and failing before subscribing gives
    /// the clearer log line.
    pub fn configure(spec: WatchSpec) -> Result<Self> {
        let mask = mask::resolve(&spec.event_names);
        if mask.is_empty() {
            return Err(WatcherdError::Config(format!(
                "watch '{}' has no recognized event tokens in {:?}",
                spec.name, spec.event_names
            )));
        }

        let exclude = ExcludeFilter::compile(&spec.exclude_patterns).map_err(|e| {
            WatcherdError::Config(format!(
                "watch '{}' has an invalid exclude pattern: {e}",
                spec.name
            ))
        })?;

        Ok(Self { spec, mask, exclude })
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn mask(&self) -> WatchMask {
        self.mask
    }

    /// Register the kernel subscription, moving the binding to `Subscribed`.
    pub fn subscribe(self) -> Result<WatchBinding> {
        let subscription = Subscription::open(
            &self.spec.path,
            self.mask,
            self.spec.recursive,
            self.spec.auto_add,
            self.exclude.clone(),
        )?;

        info!(
            watch = %self.spec.name,
            path = %self.spec.path.display(),
            directories = subscription.watch_count(),
            "watch subscribed"
        );

        Ok(WatchBinding {
            name: self.spec.name,
            command_template: self.spec.command_template,
            exclude: self.exclude,
            subscription,
        })
    }
}

/// A subscribed watch: couples the live subscription to the dispatch loop.
///
/// Exclusive owner of its subscription; no two bindings share one, so an
/// event processed here was necessarily produced by this watch.
pub struct WatchBinding {
    name: String,
    command_template: String,
    exclude: ExcludeFilter,
    subscription: Subscription,
}

impl WatchBinding {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the event-processing loop until shutdown is signalled or the
    /// event stream ends. Dropping the binding on return releases the
    /// kernel subscription.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>, sink: Arc<dyn CommandSink>) {
        info!(watch = %self.name, "watch loop started");

        loop {
            tokio::select! {
                _ = shutdown.changed() => break,
                maybe = self.subscription.next_event() => match maybe {
                    None => {
                        warn!(watch = %self.name, "event stream ended");
                        break;
                    }
                    Some(Err(e)) => {
                        error!(watch = %self.name, error = %e, "failed to read events");
                        break;
                    }
                    Some(Ok(event)) => self.dispatch(event, sink.as_ref()).await,
                },
            }
        }

        info!(watch = %self.name, "watch loop stopped");
    }

    /// Handle one observed event: filter, log, expand, execute.
    ///
    /// Expansion and execution failures are logged and skipped; they never
    /// affect the loop or the subscription.
    async fn dispatch(&self, event: FileEvent, sink: &dyn CommandSink) {
        if self.exclude.matches(&event.full_path) {
            return;
        }

        info!(
            watch = %self.name,
            "{}: {}",
            event.kind.label(),
            event.full_path.display()
        );

        let command = match template::expand(&self.command_template, &event) {
            Ok(command) => command,
            Err(e) => {
                error!(watch = %self.name, error = %e, "skipping event");
                return;
            }
        };

        if let Err(source) = sink.run(command.clone()).await {
            let err = WatcherdError::Execution { command, source };
            error!(watch = %self.name, "{err}");
        }
    }
}
