//! Price history command.

use anyhow::{Context, Result};
use std::path::Path;
use tracker_core::traits::HistoryStore;
use tracker_data::CsvHistoryStore;

use super::load_valid_config;
use crate::cli::HistoryArgs;

pub async fn run(args: HistoryArgs, config_path: &Path) -> Result<()> {
    let config = load_valid_config(config_path)?;
    let store = CsvHistoryStore::new(&config.history.path);

    let mut observations = store
        .observations()
        .with_context(|| format!("Failed to read {}", store.path().display()))?;
    if let Some(limit) = args.limit {
        let skip = observations.len().saturating_sub(limit);
        observations = observations.split_off(skip);
    }

    if args.output == "json" {
        println!("{}", serde_json::to_string_pretty(&observations)?);
        return Ok(());
    }

    if observations.is_empty() {
        println!("No prices recorded yet in {}", store.path().display());
        return Ok(());
    }

    println!("Price history for {}", config.product.url);
    println!("═══════════════════════════════════════════════════════════");
    println!("  {:<19}  {:>14}", "Timestamp", "Price");
    println!("  ───────────────────────────────────────────────────────");
    for obs in &observations {
        println!("  {:<19}  {:>14}", obs.formatted_timestamp(), format!("${}", obs.price));
    }

    Ok(())
}
