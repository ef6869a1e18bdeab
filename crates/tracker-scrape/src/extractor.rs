//! CSS selector based price extractors.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracker_core::error::{TrackerError, TrackerResult};
use tracker_core::traits::PriceExtractor;
use tracker_core::types::Price;
use tracing::debug;

use crate::price_text::clean_price_text;

/// How to locate the price on the product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractorSpec {
    /// One element whose text holds the whole price
    Selector { selector: String },
    /// Separate elements for the integer and fractional parts
    Split { whole: String, fraction: String },
}

impl Default for ExtractorSpec {
    fn default() -> Self {
        ExtractorSpec::Selector {
            selector: "div.Nx9bqj.CxhGGd".to_string(),
        }
    }
}

/// Build the extractor described by `spec`.
pub fn build_extractor(spec: &ExtractorSpec) -> TrackerResult<Box<dyn PriceExtractor>> {
    let extractor: Box<dyn PriceExtractor> = match spec {
        ExtractorSpec::Selector { selector } => Box::new(SelectorExtractor::new(selector)?),
        ExtractorSpec::Split { whole, fraction } => {
            Box::new(SplitPriceExtractor::new(whole, fraction)?)
        }
    };
    Ok(extractor)
}

fn parse_selector(css: &str) -> TrackerResult<Selector> {
    Selector::parse(css)
        .map_err(|e| TrackerError::Config(format!("invalid selector {:?}: {}", css, e)))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Reads the price from the text of the first element matching a selector.
pub struct SelectorExtractor {
    selector: Selector,
}

impl SelectorExtractor {
    /// Create an extractor for the given CSS selector.
    pub fn new(css: &str) -> TrackerResult<Self> {
        Ok(Self {
            selector: parse_selector(css)?,
        })
    }
}

impl PriceExtractor for SelectorExtractor {
    fn extract(&self, content: &str) -> Option<Price> {
        let document = Html::parse_document(content);

        let Some(element) = document.select(&self.selector).next() else {
            debug!("Price element not found on the page");
            return None;
        };

        let text = element_text(element);
        debug!(raw = %text, "Raw price text extracted");

        clean_price_text(&text)
    }

    fn name(&self) -> &str {
        "selector"
    }
}

/// Reads a price split across an integer element and a fraction element.
///
/// Both elements must be present. Only their digits are kept, so `"1,299."`
/// and `"99"` combine to `1299.99`.
pub struct SplitPriceExtractor {
    whole: Selector,
    fraction: Selector,
}

impl SplitPriceExtractor {
    /// Create an extractor for the given whole and fraction selectors.
    pub fn new(whole: &str, fraction: &str) -> TrackerResult<Self> {
        Ok(Self {
            whole: parse_selector(whole)?,
            fraction: parse_selector(fraction)?,
        })
    }
}

impl PriceExtractor for SplitPriceExtractor {
    fn extract(&self, content: &str) -> Option<Price> {
        let document = Html::parse_document(content);

        let whole = document.select(&self.whole).next().map(element_text);
        let fraction = document.select(&self.fraction).next().map(element_text);

        let (Some(whole), Some(fraction)) = (whole, fraction) else {
            debug!("Price elements not found on the page");
            return None;
        };
        debug!(whole = %whole, fraction = %fraction, "Raw price parts extracted");

        if whole.contains('-') {
            return None;
        }

        let whole: String = whole.chars().filter(|c| c.is_ascii_digit()).collect();
        let fraction: String = fraction.chars().filter(|c| c.is_ascii_digit()).collect();

        if whole.is_empty() {
            return None;
        }

        if fraction.is_empty() {
            Price::parse(&whole)
        } else {
            Price::parse(&format!("{}.{}", whole, fraction))
        }
    }

    fn name(&self) -> &str {
        "split"
    }
}
