//! # Sweep Runtime
//!
//! ## Startup Sequence
//!
//! 1. Parse the command line
//! 2. Load configuration (defaults, file, environment, flags) and validate
//! 3. Initialize logging
//! 4. Install the Ctrl-C handler (cooperative cancellation between batches)
//! 5. Dispatch the subcommand

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bv_03_live_sampler::CancelHandle;
use sweep_runtime::{commands, Cli, Command, RuntimeConfig};

fn init_logging(config: &RuntimeConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log level")?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if config.json_logs {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))
    } else {
        builder
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        RuntimeConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    init_logging(&config)?;

    let cancel = CancelHandle::new();
    let control = config.run_control(cancel.subscribe());
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current batch");
            cancel.cancel();
        }
    });

    match cli.command {
        Command::Live { log, .. } => commands::live(&config, log, control).await?,
        Command::Replay { log } => commands::replay(&config, &log)?,
        Command::Duplicates { log } => commands::duplicates(&config, &log)?,
        Command::Majority { log } => commands::majority(&config, &log)?,
        Command::Sweep { output, .. } => commands::sweep(&config, control, output).await?,
    }

    info!("Done");
    Ok(())
}
