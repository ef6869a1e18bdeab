//! CLI command implementations.

pub mod history;
pub mod once;
pub mod run;
pub mod validate;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracker_config::{load_config, AppConfig};
use tracker_core::traits::{HistoryStore, Notifier, PriceExtractor};
use tracker_data::{CsvHistoryStore, MemoryHistoryStore};
use tracker_engine::Tracker;
use tracker_monitor::TracingReporter;
use tracker_notify::{EmailNotifier, LogNotifier};
use tracker_scrape::{build_extractor, HttpFetcher};
use tracing::{info, warn};

/// Load and validate the configuration file.
pub fn load_valid_config(config_path: &Path) -> Result<AppConfig> {
    let config = load_config(config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;
    config.validate()?;
    Ok(config)
}

/// Wire a tracker from configuration.
///
/// A dry run reads the real history but records into memory and logs alerts
/// instead of sending them.
pub fn build_tracker(config: &AppConfig, dry_run: bool) -> Result<Tracker> {
    let fetcher = Arc::new(
        HttpFetcher::new(config.fetcher_config()).context("Failed to create page fetcher")?,
    );
    let extractor: Arc<dyn PriceExtractor> = Arc::from(build_extractor(&config.product.extractor)?);

    let history: Arc<dyn HistoryStore> = if dry_run {
        let csv = CsvHistoryStore::new(&config.history.path);
        let seed = csv.latest().ok().flatten().into_iter().collect();
        Arc::new(MemoryHistoryStore::with_observations(seed))
    } else {
        match CsvHistoryStore::open(&config.history.path) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                // Appends retry the initialization, so this is not fatal.
                warn!("Error creating price history file: {}", e);
                Arc::new(CsvHistoryStore::new(&config.history.path))
            }
        }
    };

    let notifier: Arc<dyn Notifier> = if dry_run || !config.email.enabled {
        info!("Email alerts disabled, price drops will only be logged");
        Arc::new(LogNotifier::new())
    } else {
        let email = config.email_config()?;
        Arc::new(EmailNotifier::new(email).context("Failed to create email notifier")?)
    };

    Ok(Tracker::new(
        config.product_ref(),
        fetcher,
        extractor,
        history,
        notifier,
        Arc::new(TracingReporter::new()),
    ))
}
