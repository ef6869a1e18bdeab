//! Configuration structures.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracker_core::error::{TrackerError, TrackerResult};
use tracker_core::types::ProductRef;
use tracker_engine::Scheduler;
use tracker_notify::EmailConfig;
use tracker_scrape::{ExtractorSpec, HttpFetcherConfig};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub product: ProductSettings,
    #[serde(default)]
    pub fetch: FetchSettings,
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub email: EmailSettings,
    #[serde(default)]
    pub schedule: ScheduleSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Check the values that deserialization alone cannot.
    pub fn validate(&self) -> TrackerResult<()> {
        let url = self.product.url.trim();
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .ok_or_else(|| {
                TrackerError::Config(format!("product.url must be an http(s) URL, got {:?}", url))
            })?;
        if rest.split('/').next().map_or(true, str::is_empty) {
            return Err(TrackerError::Config("product.url has no host".to_string()));
        }

        tracker_scrape::build_extractor(&self.product.extractor)?;

        Scheduler::every_hours(self.schedule.interval_hours)
            .map_err(|e| TrackerError::Config(format!("schedule.interval_hours: {}", e)))?;

        self.fetcher_config()
            .validate()
            .map_err(|e| TrackerError::Config(format!("fetch: {}", e)))?;

        if self.email.enabled {
            for (field, value) in [("email.sender", &self.email.sender), ("email.receiver", &self.email.receiver)] {
                if !value.contains('@') {
                    return Err(TrackerError::Config(format!(
                        "{} must be an email address, got {:?}",
                        field, value
                    )));
                }
            }
            if self.email.smtp_server.trim().is_empty() {
                return Err(TrackerError::Config("email.smtp_server is empty".to_string()));
            }
            if self.email.timeout_secs == 0 {
                return Err(TrackerError::Config(
                    "email.timeout_secs must be at least 1".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// The tracked product.
    pub fn product_ref(&self) -> ProductRef {
        ProductRef::new(self.product.url.trim())
    }

    /// HTTP client settings for the page fetcher.
    pub fn fetcher_config(&self) -> HttpFetcherConfig {
        HttpFetcherConfig {
            user_agent: self.fetch.user_agent.clone(),
            accept_language: self.fetch.accept_language.clone(),
            timeout: Duration::from_secs(self.fetch.timeout_secs),
            accept_invalid_certs: self.fetch.accept_invalid_certs,
        }
    }

    /// SMTP settings, with the password read from the configured variable.
    pub fn email_config(&self) -> TrackerResult<EmailConfig> {
        let password = std::env::var(&self.email.password_env).map_err(|_| {
            TrackerError::Config(format!("{} not set", self.email.password_env))
        })?;

        Ok(EmailConfig {
            smtp_server: self.email.smtp_server.clone(),
            smtp_port: self.email.smtp_port,
            sender: self.email.sender.clone(),
            receiver: self.email.receiver.clone(),
            password,
            timeout: Duration::from_secs(self.email.timeout_secs),
        })
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> TrackerResult<String> {
        toml::to_string_pretty(self).map_err(|e| TrackerError::Internal(e.to_string()))
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "price-tracker".to_string(),
        }
    }
}

/// The tracked product.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductSettings {
    pub url: String,
    #[serde(default)]
    pub extractor: ExtractorSpec,
}

/// Page fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub accept_language: String,
    pub accept_invalid_certs: bool,
}

impl Default for FetchSettings {
    fn default() -> Self {
        let http = HttpFetcherConfig::default();
        Self {
            timeout_secs: http.timeout.as_secs(),
            user_agent: http.user_agent,
            accept_language: http.accept_language,
            accept_invalid_certs: http.accept_invalid_certs,
        }
    }
}

/// Price history settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub path: String,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            path: "price_history.csv".to_string(),
        }
    }
}

/// Email alert settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    pub enabled: bool,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub sender: String,
    pub receiver: String,
    /// Environment variable holding the SMTP password
    pub password_env: String,
    pub timeout_secs: u64,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            smtp_server: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            sender: String::new(),
            receiver: String::new(),
            password_env: "PRICE_TRACKER_SMTP_PASSWORD".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Cycle cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSettings {
    pub interval_hours: u64,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self { interval_hours: 1 }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}
