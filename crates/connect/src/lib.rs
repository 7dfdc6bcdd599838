//! Roastfolio Connect - account linking through the financial data aggregator.
//!
//! This crate talks to the aggregator (Plaid) on behalf of the server:
//! creating link tokens, exchanging public tokens for access tokens and
//! fetching investment holdings, which are then normalized by
//! `roastfolio-core`.

pub mod aggregator;
pub mod client;
pub mod config;
pub mod errors;

// Re-export commonly used types
pub use aggregator::{
    AggregatorApiClient, AuthenticationService, AuthenticationServiceTrait, InvestmentHoldings,
    InvestmentsService, InvestmentsServiceTrait, LinkTokenCreateRequest, LinkTokenUser,
};
pub use client::PlaidApiClient;
pub use config::{LinkTokenSettings, PlaidConfig, PlaidEnvironment, PLAID_API_VERSION};
pub use errors::{AggregatorError, AggregatorResult};
