//! Roastfolio Core - Domain entities and the holdings normalization pipeline.
//!
//! This crate contains the business logic for Roast My Portfolio. It performs
//! no I/O: upstream aggregator access lives in `roastfolio-connect` and the
//! HTTP surface lives in `roastfolio-server`.

pub mod constants;
pub mod errors;
pub mod portfolio;
pub mod rate_limit;
pub mod share;

pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
