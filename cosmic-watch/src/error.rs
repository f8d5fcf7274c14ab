//! Error types for the watch pipeline

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for watch operations
pub type Result<T> = std::result::Result<T, WatchError>;

#[derive(Debug, Error)]
pub enum WatchError {
    /// Structural precondition violation in feed data (missing or
    /// unparsable close-approach data). Never recovered locally.
    #[error("Malformed feed: {0}")]
    MalformedFeed(String),

    /// Network or HTTP failure during a feed fetch or probe
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("A feed fetch is already in progress")]
    FetchInProgress,

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// The consuming view was shut down before the operation completed
    #[error("View has been torn down")]
    TornDown,

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl WatchError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedFeed(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::TransportFailure(message.into())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportFailure(_))
    }
}

impl From<reqwest::Error> for WatchError {
    fn from(e: reqwest::Error) -> Self {
        Self::TransportFailure(e.to_string())
    }
}
