//! Price drop alert delivery.

mod email;
mod log_notifier;
mod message;

pub use email::{EmailConfig, EmailNotifier};
pub use log_notifier::LogNotifier;
pub use message::{alert_body, alert_subject};
