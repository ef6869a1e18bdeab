//! Core data types for the price tracker.

mod observation;
mod price;
mod product;

pub use observation::{Observation, TIMESTAMP_FORMAT};
pub use price::Price;
pub use product::ProductRef;
