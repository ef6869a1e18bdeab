//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, EmailSettings, FetchSettings, HistorySettings, LoggingConfig,
    ProductSettings, ScheduleSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables use the `PRICE_TRACKER` prefix with `__` between
/// sections, e.g. `PRICE_TRACKER__SCHEDULE__INTERVAL_HOURS=6`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("PRICE_TRACKER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
