//! Errors raised while talking to the aggregator.
//!
//! Services wrap these into `roastfolio_core::Error` so callers see an
//! authentication or data failure with the upstream message preserved.

use thiserror::Error;

pub type AggregatorResult<T> = std::result::Result<T, AggregatorError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregatorError {
    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Request timed out")]
    Timeout,

    /// The aggregator answered with a non-success status.
    #[error("HTTP {status} [{code}]: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid aggregator configuration: {0}")]
    InvalidConfig(String),
}

impl From<reqwest::Error> for AggregatorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AggregatorError::Timeout
        } else {
            AggregatorError::Request(err.to_string())
        }
    }
}
