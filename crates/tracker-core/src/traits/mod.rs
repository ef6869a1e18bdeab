//! Core traits for the price tracker.

mod extractor;
mod fetcher;
mod history;
mod notifier;
mod reporter;

pub use extractor::PriceExtractor;
pub use fetcher::PageFetcher;
pub use history::HistoryStore;
pub use notifier::Notifier;
pub use reporter::{ReportLevel, Reporter};
