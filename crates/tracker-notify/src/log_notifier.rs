//! Log-only notifier for dry runs.

use async_trait::async_trait;
use tracker_core::error::NotifyError;
use tracker_core::traits::Notifier;
use tracker_core::types::{Price, ProductRef};
use tracing::info;

use crate::message::{alert_body, alert_subject};

/// Writes alerts to the log instead of sending them.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, price: Price, product: &ProductRef) -> Result<(), NotifyError> {
        info!(
            subject = %alert_subject(price),
            "[dry-run] {}",
            alert_body(price, product)
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_logging_never_fails() {
        let notifier = LogNotifier::new();
        let product = ProductRef::new("https://shop.example/p/1");

        assert!(notifier.notify(Price::new(dec!(5)).unwrap(), &product).await.is_ok());
        assert!(notifier.notify(Price::ZERO, &product).await.is_ok());
        assert_eq!(notifier.name(), "log");
    }
}
