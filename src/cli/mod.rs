//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "price-tracker")]
#[command(author, version, about = "Track a product's price and get an email when it drops")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides logging.level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    /// Also write logs to this file (overrides logging.file)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Track the price on a fixed schedule until interrupted
    Run(RunArgs),
    /// Run a single tracking cycle
    Once(OnceArgs),
    /// Show the recorded price history
    History(HistoryArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Log alerts instead of emailing them and keep the history file untouched
    #[arg(long)]
    pub dry_run: bool,

    /// Wait one interval before the first cycle
    #[arg(long)]
    pub skip_initial: bool,

    /// Interval in hours (overrides schedule.interval_hours)
    #[arg(long)]
    pub interval_hours: Option<u64>,
}

#[derive(clap::Args)]
pub struct OnceArgs {
    /// Log alerts instead of emailing them and keep the history file untouched
    #[arg(long)]
    pub dry_run: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,
}

#[derive(clap::Args)]
pub struct HistoryArgs {
    /// Show only the most recent N observations
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,
}
