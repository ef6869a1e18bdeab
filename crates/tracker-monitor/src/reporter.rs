//! Reporter backed by `tracing`.

use tracker_core::traits::{ReportLevel, Reporter};
use tracing::{debug, error, info, warn};

/// Forwards tracker reports to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl TracingReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for TracingReporter {
    fn report(&self, level: ReportLevel, message: &str) {
        match level {
            ReportLevel::Debug => debug!("{}", message),
            ReportLevel::Info => info!("{}", message),
            ReportLevel::Warn => warn!("{}", message),
            ReportLevel::Error => error!("{}", message),
        }
    }
}
