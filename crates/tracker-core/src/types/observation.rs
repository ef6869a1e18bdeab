//! Price observations.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::Price;

/// Human-readable timestamp format used in the history file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single recorded `(timestamp, price)` pair.
///
/// Observations are only ever appended to the history, never edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Local wall-clock time, second precision
    pub timestamp: NaiveDateTime,
    /// Recorded price
    pub price: Price,
}

impl Observation {
    /// Create an observation.
    pub fn new(timestamp: NaiveDateTime, price: Price) -> Self {
        Self { timestamp, price }
    }

    /// Create an observation stamped with the current local time.
    pub fn now(price: Price) -> Self {
        let timestamp = Local::now().naive_local();
        // History rows carry whole seconds only.
        let timestamp = timestamp.with_nanosecond(0).unwrap_or(timestamp);
        Self { timestamp, price }
    }

    /// Timestamp rendered with [`TIMESTAMP_FORMAT`].
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Parse a history timestamp.
    ///
    /// Accepts [`TIMESTAMP_FORMAT`], the same with fractional seconds, and the
    /// `T`-separated ISO 8601 form.
    pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
        let formats = [TIMESTAMP_FORMAT, "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];

        formats
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text.trim(), format).ok())
    }
}
