//! Scheduled tracking command.

use anyhow::{Context, Result};
use std::path::Path;
use tracker_engine::Scheduler;
use tracing::{info, warn};

use super::{build_tracker, load_valid_config};
use crate::cli::RunArgs;

pub async fn run(args: RunArgs, config_path: &Path) -> Result<()> {
    let config = load_valid_config(config_path)?;
    let tracker = build_tracker(&config, args.dry_run)?;

    let hours = args.interval_hours.unwrap_or(config.schedule.interval_hours);
    let mut scheduler = Scheduler::every_hours(hours).context("Invalid --interval-hours")?;
    if args.skip_initial {
        scheduler = scheduler.skip_initial();
    }

    let cycles = scheduler.run(&tracker, shutdown_signal()).await;
    info!("Price tracker stopped after {} cycles", cycles);

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => {
            warn!("Unable to listen for Ctrl-C, running until killed: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
