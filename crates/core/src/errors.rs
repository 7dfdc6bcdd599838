//! Core error types for Roast My Portfolio.
//!
//! Upstream failures are carried as strings so the original aggregator
//! message survives all the way to the HTTP response.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the portfolio application.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The ephemeral public token could not be exchanged for an access token.
    #[error("Error getting access token: {0}")]
    UpstreamAuth(String),

    /// Holdings could not be fetched after a valid access token was obtained.
    #[error("Error fetching holdings: {0}")]
    UpstreamData(String),

    /// The aggregator refused to issue a link token.
    #[error("Failed to get link token: {0}")]
    LinkToken(String),

    #[error("Request limit of {limit} exceeded")]
    RateLimitExceeded { limit: u64 },

    /// A shared portfolio payload could not be decoded.
    #[error("Malformed share link: {0}")]
    MalformedShareLink(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
