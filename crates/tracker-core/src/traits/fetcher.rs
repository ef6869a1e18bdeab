//! Page fetcher trait definition.

use crate::error::FetchError;
use crate::types::ProductRef;
use async_trait::async_trait;

/// Retrieves the raw content of a product page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page behind `product`.
    ///
    /// # Returns
    /// The page body as text. Non-success status codes are not errors as long
    /// as a body was received; the extractor decides whether it is usable.
    async fn fetch(&self, product: &ProductRef) -> Result<String, FetchError>;

    /// Get the fetcher name.
    fn name(&self) -> &str;
}
