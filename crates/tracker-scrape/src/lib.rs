//! Product page fetching and price extraction.

mod extractor;
mod http;
mod price_text;

pub use extractor::{build_extractor, ExtractorSpec, SelectorExtractor, SplitPriceExtractor};
pub use http::{HttpFetcher, HttpFetcherConfig};
pub use price_text::clean_price_text;
