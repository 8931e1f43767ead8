// src/daemon.rs

//! Process-lifecycle collaborator: pid-file handling and the
//! start/stop/status/restart contract.
//!
//! The dispatch engine does not depend on anything in here. Instead of an
//! in-process double fork, `start` spawns a detached copy of the current
//! executable running the foreground `debug` command, with stdout/stderr
//! appended to the configured logfile, and records the child's pid.

use std::fs::{self, OpenOptions};
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use tracing::{info, warn};

use crate::cli::LogLevel;
use crate::errors::{Result, WatcherdError};

/// How long `stop` waits for the daemon to exit after SIGTERM.
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(100);
const STOP_POLL_ATTEMPTS: u32 = 50;

pub struct Daemon {
    pidfile: PathBuf,
    logfile: PathBuf,
}

impl Daemon {
    pub fn new(pidfile: PathBuf, logfile: PathBuf) -> Self {
        Self { pidfile, logfile }
    }

    /// Start the daemon in the background.
    ///
    /// Refuses to start when the pidfile names a live process; a stale
    /// pidfile left by a crashed daemon is cleaned up and start proceeds.
    pub fn start(&self, config_path: &Path, log_level: Option<LogLevel>) -> Result<()> {
        if let Some(pid) = self.read_pid()? {
            if process_alive(pid) {
                return Err(WatcherdError::AlreadyRunning(self.pidfile.clone()));
            }
            warn!(pidfile = %self.pidfile.display(), pid, "removing stale pidfile");
            let _ = fs::remove_file(&self.pidfile);
        }

        let exe = std::env::current_exe()?;
        let log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.logfile)?;
        let log_err = log.try_clone()?;

        let mut cmd = Command::new(exe);
        cmd.arg("--config").arg(config_path);
        if let Some(level) = log_level {
            cmd.arg("--log-level").arg(level.as_str());
        }
        cmd.arg("debug")
            .stdin(Stdio::null())
            .stdout(log)
            .stderr(log_err)
            .process_group(0);

        let child = cmd.spawn()?;
        fs::write(&self.pidfile, format!("{}\n", child.id()))?;

        info!(pid = child.id(), logfile = %self.logfile.display(), "daemon started");
        Ok(())
    }

    /// Stop the daemon: SIGTERM, wait for exit, remove the pidfile.
    ///
    /// A missing pidfile is not an error (restart must tolerate it).
    pub fn stop(&self) -> Result<()> {
        let Some(pid) = self.read_pid()? else {
            info!(pidfile = %self.pidfile.display(), "pidfile does not exist; daemon not running?");
            return Ok(());
        };

        for _ in 0..STOP_POLL_ATTEMPTS {
            if !process_alive(pid) {
                let _ = fs::remove_file(&self.pidfile);
                info!(pid, "daemon stopped");
                return Ok(());
            }
            send_sigterm(pid);
            std::thread::sleep(STOP_POLL_INTERVAL);
        }

        Err(WatcherdError::Other(anyhow::anyhow!(
            "daemon (pid {pid}) did not exit after SIGTERM"
        )))
    }

    /// Returns true if the pidfile names a live process.
    pub fn status(&self) -> Result<bool> {
        Ok(self.read_pid()?.is_some_and(process_alive))
    }

    fn read_pid(&self) -> Result<Option<i32>> {
        let contents = match fs::read_to_string(&self.pidfile) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match contents.trim().parse::<i32>() {
            Ok(pid) => Ok(Some(pid)),
            Err(_) => {
                warn!(pidfile = %self.pidfile.display(), "pidfile contains garbage; ignoring");
                Ok(None)
            }
        }
    }
}

fn process_alive(pid: i32) -> bool {
    // Signal 0 probes for existence without delivering anything.
    unsafe { libc::kill(pid, 0) == 0 }
}

fn send_sigterm(pid: i32) {
    unsafe {
        libc::kill(pid, libc::SIGTERM);
    }
}
