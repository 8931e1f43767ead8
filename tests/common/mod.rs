#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use watcherd::exec::CommandSink;

/// A command sink that records expanded command lines instead of spawning
/// processes.
#[derive(Clone, Default)]
pub struct RecordingSink {
    commands: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.commands.lock().unwrap().len()
    }
}

impl CommandSink for RecordingSink {
    fn run(
        &self,
        command: String,
    ) -> Pin<Box<dyn Future<Output = std::io::Result<()>> + Send + '_>> {
        let commands = Arc::clone(&self.commands);
        Box::pin(async move {
            commands.lock().unwrap().push(command);
            Ok(())
        })
    }
}

/// Poll `cond` until it holds or `timeout` expires.
pub async fn wait_for<F>(cond: F, timeout: Duration) -> bool
where
    F: Fn() -> bool,
{
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    cond()
}
