//! Price extractor trait definition.

use crate::types::Price;

/// Finds the listed price in raw page content.
///
/// Extraction failure is an expected outcome, so implementations return
/// `None` rather than an error and must not panic on arbitrary input.
pub trait PriceExtractor: Send + Sync {
    /// Extract the current price from `content`.
    fn extract(&self, content: &str) -> Option<Price>;

    /// Get the extractor name.
    fn name(&self) -> &str;
}
