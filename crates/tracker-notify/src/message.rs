//! Alert message text.

use tracker_core::types::{Price, ProductRef};

/// Subject line of a price drop alert.
pub fn alert_subject(price: Price) -> String {
    format!("Price Drop Alert! New Price: ${}", price)
}

/// Plain text body of a price drop alert.
pub fn alert_body(price: Price, product: &ProductRef) -> String {
    format!(
        "The price has dropped to ${}. Check the product here: {}",
        price, product
    )
}
