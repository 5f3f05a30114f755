//! Error types for divscan.

use chrono::NaiveDate;
use thiserror::Error;

use crate::SeriesError;

/// Result type alias for divscan operations.
pub type Result<T> = std::result::Result<T, DivscanError>;

/// Errors that can occur while fetching and screening tickers.
#[derive(Error, Debug)]
pub enum DivscanError {
    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response decoded, but the expected payload is missing or unusable.
    #[error("Decode error: {0}")]
    Decode(String),

    /// No price data available for the requested symbol.
    #[error("No data available for {symbol}")]
    DataUnavailable {
        /// The symbol that had no data.
        symbol: String,
    },

    /// The provider does not list the requested expiration.
    #[error("{symbol} has no option expiration {expiration}")]
    UnknownExpiration {
        /// The underlying symbol.
        symbol: String,
        /// The requested expiration date.
        expiration: NaiveDate,
    },

    /// Invalid bar sequence.
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// Date window construction failed.
    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    /// Oscillator and price series are misaligned.
    #[error("No price bar for oscillator date {date}")]
    MissingOscillator {
        /// The oscillator date without a matching bar.
        date: NaiveDate,
    },
}

/// Error raised when a date window cannot be built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// The start date falls after the end date.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// Start bound that was rejected.
        start: NaiveDate,
        /// End bound that was rejected.
        end: NaiveDate,
    },
}
