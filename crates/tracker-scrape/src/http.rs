//! HTTPS page fetcher.

use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;
use tracker_core::error::FetchError;
use tracker_core::traits::PageFetcher;
use tracker_core::types::ProductRef;
use tracing::{debug, info, warn};

/// HTTP client settings for fetching product pages.
#[derive(Debug, Clone)]
pub struct HttpFetcherConfig {
    pub user_agent: String,
    pub accept_language: String,
    pub timeout: Duration,
    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

impl HttpFetcherConfig {
    /// Check the settings a client cannot be built from.
    pub fn validate(&self) -> Result<(), FetchError> {
        header::HeaderValue::from_str(&self.accept_language).map_err(|e| {
            FetchError::Configuration(format!("accept_language {:?}: {}", self.accept_language, e))
        })?;
        header::HeaderValue::from_str(&self.user_agent).map_err(|e| {
            FetchError::Configuration(format!("user_agent {:?}: {}", self.user_agent, e))
        })?;
        if self.timeout.is_zero() {
            return Err(FetchError::Configuration("timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Fetches product pages over HTTP(S).
pub struct HttpFetcher {
    config: HttpFetcherConfig,
    client: Client,
}

impl HttpFetcher {
    /// Create a new fetcher.
    pub fn new(config: HttpFetcherConfig) -> Result<Self, FetchError> {
        config.validate()?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_str(&config.accept_language)
                .map_err(|e| FetchError::Configuration(e.to_string()))?,
        );

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| FetchError::Configuration(e.to_string()))?;

        if config.accept_invalid_certs {
            warn!("TLS certificate verification is disabled for page fetches");
        }

        Ok(Self { config, client })
    }

    fn map_send_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else {
            FetchError::Connection(err.to_string())
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, product: &ProductRef) -> Result<String, FetchError> {
        debug!(url = %product, "Sending request to fetch the product page");

        let resp = self
            .client
            .get(product.as_str())
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = resp.status();
        if status.is_success() {
            info!("Product page fetched successfully");
        } else {
            warn!("Received unexpected status code: {}", status);
        }

        let body = resp.text().await.map_err(|e| {
            if e.is_timeout() {
                self.map_send_error(e)
            } else {
                FetchError::Body(e.to_string())
            }
        })?;

        debug!(bytes = body.len(), "Product page body received");
        Ok(body)
    }

    fn name(&self) -> &str {
        "http"
    }
}
