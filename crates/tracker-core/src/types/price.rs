//! Price type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;

/// A non-negative currency amount in the tracker's single implicit currency.
///
/// Comparison ignores scale, so `999` and `999.00` are the same price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Price = Price(Decimal::ZERO);

    /// Create a price, rejecting negative amounts.
    pub fn new(value: Decimal) -> Option<Self> {
        if value < Decimal::ZERO {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Parse decimal text such as `"899.00"`.
    ///
    /// Anything that is not a plain non-negative decimal yields `None`.
    pub fn parse(text: &str) -> Option<Self> {
        Decimal::from_str(text.trim()).ok().and_then(Self::new)
    }

    /// The underlying decimal amount.
    #[inline]
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Amount by which this price is below `other`, if it is.
    pub fn drop_from(&self, other: Price) -> Option<Decimal> {
        (self.0 < other.0).then(|| other.0 - self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = TrackerError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
            .ok_or_else(|| TrackerError::Validation(format!("negative price: {}", value)))
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl FromStr for Price {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TrackerError::Validation(format!("invalid price: {:?}", s)))
    }
}
