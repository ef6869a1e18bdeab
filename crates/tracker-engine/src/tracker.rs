//! The price tracking cycle.

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracker_core::traits::{HistoryStore, Notifier, PageFetcher, PriceExtractor, Reporter};
use tracker_core::types::{Price, ProductRef};

use crate::outcome::CycleOutcome;

/// Whether `current` counts as a price drop against the last logged price.
///
/// Without a baseline every price is a drop. Equal prices are not.
#[inline]
pub fn is_drop(current: Price, last: Option<Price>) -> bool {
    match last {
        None => true,
        Some(last) => current < last,
    }
}

/// Tracks the price of one product.
///
/// Each call to [`Tracker::run_cycle`] fetches the page, extracts the price,
/// compares it with the last logged price and, on a drop, records it and sends
/// an alert. The tracker holds no timing state; scheduling is the caller's job.
pub struct Tracker {
    product: ProductRef,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn PriceExtractor>,
    history: Arc<dyn HistoryStore>,
    notifier: Arc<dyn Notifier>,
    reporter: Arc<dyn Reporter>,
}

impl Tracker {
    /// Create a tracker for `product`.
    pub fn new(
        product: ProductRef,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn PriceExtractor>,
        history: Arc<dyn HistoryStore>,
        notifier: Arc<dyn Notifier>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            product,
            fetcher,
            extractor,
            history,
            notifier,
            reporter,
        }
    }

    /// Get the tracked product.
    pub fn product(&self) -> &ProductRef {
        &self.product
    }

    /// Run one tracking cycle.
    ///
    /// Never fails: fetch, store and notification errors are reported and
    /// folded into the outcome, and a panic inside the cycle is caught and
    /// returned as [`CycleOutcome::Aborted`].
    pub async fn run_cycle(&self) -> CycleOutcome {
        self.reporter.info(&format!(
            "Starting price tracking cycle for {} (fetcher: {}, extractor: {}, notifier: {})",
            self.product,
            self.fetcher.name(),
            self.extractor.name(),
            self.notifier.name()
        ));

        let outcome = match AssertUnwindSafe(self.cycle()).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                self.reporter
                    .error(&format!("Error in price tracking: {}", reason));
                CycleOutcome::Aborted { reason }
            }
        };

        self.reporter
            .info(&format!("Price tracking cycle finished: {}", outcome));
        outcome
    }

    async fn cycle(&self) -> CycleOutcome {
        let content = match self.fetcher.fetch(&self.product).await {
            Ok(content) => content,
            Err(e) => {
                self.reporter
                    .warn(&format!("Failed to retrieve the current price: {}", e));
                return CycleOutcome::FetchFailed {
                    reason: e.to_string(),
                };
            }
        };

        let Some(current) = self.extractor.extract(&content) else {
            self.reporter
                .warn("Failed to retrieve the current price: no price found on the page");
            return CycleOutcome::PriceUnavailable;
        };
        self.reporter
            .info(&format!("Fetched current price: ${}", current));

        let last = self.last_logged_price();

        if !is_drop(current, last) {
            let last = last.unwrap_or(current);
            self.reporter.info(&format!(
                "No alert sent as current price ${} is not below last logged price ${}",
                current, last
            ));
            return CycleOutcome::Unchanged {
                price: current,
                last,
            };
        }

        if let Some((previous, amount)) =
            last.and_then(|previous| current.drop_from(previous).map(|amount| (previous, amount)))
        {
            self.reporter.info(&format!(
                "Price dropped by ${} from last logged price ${}",
                amount, previous
            ));
        }

        let recorded = match self.history.append(current) {
            Ok(_) => true,
            Err(e) => {
                self.reporter.error(&format!("Error logging price: {}", e));
                false
            }
        };

        let notified = match self.notifier.notify(current, &self.product).await {
            Ok(()) => {
                self.reporter
                    .info(&format!("Sent price drop alert for price: ${}", current));
                true
            }
            Err(e) => {
                self.reporter
                    .error(&format!("Error sending price alert: {}", e));
                false
            }
        };

        CycleOutcome::Dropped {
            price: current,
            previous: last,
            recorded,
            notified,
        }
    }

    /// Last logged price; unreadable history counts as none.
    fn last_logged_price(&self) -> Option<Price> {
        match self.history.latest() {
            Ok(Some(observation)) => Some(observation.price),
            Ok(None) => {
                self.reporter
                    .info("No price history yet, treating as first run");
                None
            }
            Err(e) => {
                self.reporter.warn(&format!(
                    "Price history unusable ({}), treating as first run",
                    e
                ));
                None
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "cycle panicked".to_string()
    }
}
