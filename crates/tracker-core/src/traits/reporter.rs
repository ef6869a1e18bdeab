//! Reporter trait definition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for ReportLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReportLevel::Debug => "debug",
            ReportLevel::Info => "info",
            ReportLevel::Warn => "warn",
            ReportLevel::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// Sink for the tracker's operational messages.
///
/// Injected into the tracker instead of writing to a global logger, so tests
/// can capture what a cycle reported.
pub trait Reporter: Send + Sync {
    fn report(&self, level: ReportLevel, message: &str);

    fn info(&self, message: &str) {
        self.report(ReportLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.report(ReportLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.report(ReportLevel::Error, message);
    }
}
