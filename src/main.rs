// src/main.rs

use std::process::ExitCode;

use watcherd::cli::{self, CliArgs, DaemonCommand};
use watcherd::config;
use watcherd::daemon::Daemon;
use watcherd::errors::{Result, WatcherdError};
use watcherd::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("watcherd: failed to initialise logging: {err:?}");
        return ExitCode::from(1);
    }

    match run_command(args).await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err}");
            exit_code_for(&err)
        }
    }
}

async fn run_command(args: CliArgs) -> Result<ExitCode> {
    let config_path = config::resolve_config_path(args.config.as_deref())?;
    let cfg = config::load_and_validate(&config_path)?;

    let daemon = Daemon::new(cfg.default.pidfile.clone(), cfg.default.logfile.clone());

    match args.command {
        DaemonCommand::Start => daemon.start(&config_path, args.log_level)?,
        DaemonCommand::Stop => daemon.stop()?,
        DaemonCommand::Restart => {
            daemon.stop()?;
            daemon.start(&config_path, args.log_level)?;
        }
        DaemonCommand::Status => {
            if daemon.status()? {
                println!("service running");
            } else {
                println!("service not running");
                return Ok(ExitCode::from(3));
            }
        }
        DaemonCommand::Debug => watcherd::run(cfg).await?,
    }

    Ok(ExitCode::SUCCESS)
}

fn exit_code_for(err: &WatcherdError) -> ExitCode {
    match err {
        WatcherdError::Config(_) | WatcherdError::Toml(_) => ExitCode::from(4),
        WatcherdError::AlreadyRunning(_) => ExitCode::from(1),
        _ => ExitCode::from(1),
    }
}
