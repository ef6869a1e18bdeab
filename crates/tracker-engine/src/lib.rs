//! Price tracking cycle and scheduler.

mod outcome;
mod scheduler;
mod tracker;

pub use outcome::CycleOutcome;
pub use scheduler::{Scheduler, MAX_INTERVAL_HOURS};
pub use tracker::{is_drop, Tracker};

#[cfg(test)]
mod testing;
