//! Notifier trait definition.

use crate::error::NotifyError;
use crate::types::{Price, ProductRef};
use async_trait::async_trait;

/// Delivers price drop alerts through an external channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send an alert announcing `price` for `product`.
    async fn notify(&self, price: Price, product: &ProductRef) -> Result<(), NotifyError>;

    /// Get the notifier name.
    fn name(&self) -> &str;
}
