//! Result of a single tracking cycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracker_core::types::Price;

/// What a tracking cycle did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CycleOutcome {
    /// The page could not be fetched
    FetchFailed { reason: String },
    /// The page was fetched but held no usable price
    PriceUnavailable,
    /// The price is not below the last logged price
    Unchanged { price: Price, last: Price },
    /// The price dropped, or there was no baseline
    Dropped {
        price: Price,
        previous: Option<Price>,
        /// Whether the observation reached the history
        recorded: bool,
        /// Whether the alert was delivered
        notified: bool,
    },
    /// The cycle panicked and was cut short
    Aborted { reason: String },
}

impl CycleOutcome {
    /// Whether a drop was detected.
    pub fn is_drop(&self) -> bool {
        matches!(self, CycleOutcome::Dropped { .. })
    }
}

impl fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleOutcome::FetchFailed { reason } => write!(f, "fetch failed: {}", reason),
            CycleOutcome::PriceUnavailable => write!(f, "no price found on the page"),
            CycleOutcome::Unchanged { price, last } => {
                write!(f, "no drop: ${} (last logged ${})", price, last)
            }
            CycleOutcome::Dropped {
                price,
                previous,
                recorded,
                notified,
            } => {
                match previous {
                    Some(previous) => write!(f, "price dropped from ${} to ${}", previous, price)?,
                    None => write!(f, "first recorded price ${}", price)?,
                }
                write!(f, " (recorded: {}, notified: {})", recorded, notified)
            }
            CycleOutcome::Aborted { reason } => write!(f, "aborted: {}", reason),
        }
    }
}
