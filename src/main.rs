//! Price tracker CLI application.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::PathBuf;
use tracker_config::load_config;
use tracker_monitor::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging settings come from the CLI first, then the config file.
    let file_config = load_config(&cli.config).ok();
    let logging = file_config.map(|c| c.logging).unwrap_or_default();

    let log_level = cli
        .log_level
        .as_ref()
        .map(|l| l.as_str().to_string())
        .unwrap_or(logging.level);
    let json = cli.json_logs || logging.format == "json";
    let log_file = cli.log_file.clone().or_else(|| logging.file.map(PathBuf::from));

    let _guard = setup_logging(&log_level, json, log_file.as_deref());

    // Execute command
    match cli.command {
        Commands::Run(args) => cli::commands::run::run(args, &cli.config).await,
        Commands::Once(args) => cli::commands::once::run(args, &cli.config).await,
        Commands::History(args) => cli::commands::history::run(args, &cli.config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
    }
}
