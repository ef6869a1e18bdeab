//! Single cycle command.

use anyhow::Result;
use std::path::Path;

use super::{build_tracker, load_valid_config};
use crate::cli::OnceArgs;

pub async fn run(args: OnceArgs, config_path: &Path) -> Result<()> {
    let config = load_valid_config(config_path)?;
    let tracker = build_tracker(&config, args.dry_run)?;

    let outcome = tracker.run_cycle().await;

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&outcome)?),
        _ => println!("{}", outcome),
    }

    Ok(())
}
