//! Logging setup and cycle reporting.

mod logging;
mod reporter;

pub use logging::setup_logging;
pub use reporter::TracingReporter;
