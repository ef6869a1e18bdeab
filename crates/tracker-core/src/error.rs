//! Error types for the price tracker.

use thiserror::Error;

/// Top-level tracker error.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("History error: {0}")]
    Store(#[from] StoreError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Page fetch errors.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Client configuration error: {0}")]
    Configuration(String),

    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// History store errors.
///
/// A missing history file is not an error: it reads as an empty history.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("History file unreadable: {0}")]
    Unreadable(String),

    #[error("Malformed history row {line}: {reason}")]
    Malformed { line: u64, reason: String },

    #[error("Failed to write history: {0}")]
    Write(String),
}

/// Notification delivery errors.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Invalid message: {0}")]
    Message(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),
}

/// Result type alias for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;
