//! Core types and traits for the price tracker.
//!
//! This crate provides the foundational building blocks including:
//! - Price and observation types
//! - The product reference a tracker is bound to
//! - Traits for the fetcher, extractor, history store, notifier and reporter

pub mod types;
pub mod traits;
pub mod error;

pub use error::{TrackerError, TrackerResult};
pub use types::*;
pub use traits::*;
