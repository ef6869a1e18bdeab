//! In-memory price history.

use std::sync::{Mutex, MutexGuard};
use tracker_core::error::StoreError;
use tracker_core::traits::HistoryStore;
use tracker_core::types::{Observation, Price};

/// Price history held in memory and lost on drop.
///
/// Used for dry runs, seeded from the persisted history so comparisons match
/// what a real cycle would see.
#[derive(Default)]
pub struct MemoryHistoryStore {
    observations: Mutex<Vec<Observation>>,
}

impl MemoryHistoryStore {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history holding `observations`, oldest first.
    pub fn with_observations(observations: Vec<Observation>) -> Self {
        Self {
            observations: Mutex::new(observations),
        }
    }

    /// Number of recorded observations.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Observation>> {
        self.observations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn append(&self, price: Price) -> Result<Observation, StoreError> {
        let observation = Observation::now(price);
        self.lock().push(observation);
        Ok(observation)
    }

    fn latest(&self) -> Result<Option<Observation>, StoreError> {
        Ok(self.lock().last().copied())
    }

    fn observations(&self) -> Result<Vec<Observation>, StoreError> {
        Ok(self.lock().clone())
    }
}
