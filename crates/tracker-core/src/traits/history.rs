//! History store trait definition.

use crate::error::StoreError;
use crate::types::{Observation, Price};

/// Append-only log of price observations.
///
/// Callers guarantee a single writer; implementations need no cross-process
/// locking.
pub trait HistoryStore: Send + Sync {
    /// Append an observation of `price` stamped with the current time.
    ///
    /// # Returns
    /// The observation that was written
    fn append(&self, price: Price) -> Result<Observation, StoreError>;

    /// Get the most recent observation.
    ///
    /// # Returns
    /// `Ok(None)` when nothing has been recorded yet (including when the
    /// backing storage does not exist), an error when it cannot be read or its
    /// last entry is malformed.
    fn latest(&self) -> Result<Option<Observation>, StoreError>;

    /// Get every observation in insertion order.
    fn observations(&self) -> Result<Vec<Observation>, StoreError>;

    /// Get the last logged price.
    ///
    /// Unreadable or malformed history degrades to `None`, the same as an
    /// empty one.
    fn last_price(&self) -> Option<Price> {
        self.latest().ok().flatten().map(|obs| obs.price)
    }
}
