//! Traits defining the contract for aggregator access.

use async_trait::async_trait;

use super::models::{InvestmentHoldings, LinkTokenCreateRequest};
use crate::errors::AggregatorResult;
use roastfolio_core::errors::Result;
use roastfolio_core::portfolio::holdings::PortfolioResult;

/// Raw calls to the aggregator API.
#[async_trait]
pub trait AggregatorApiClient: Send + Sync {
    /// Create a link token for the client-side linking widget
    async fn create_link_token(&self, request: &LinkTokenCreateRequest) -> AggregatorResult<String>;

    /// Exchange a one-time public token for a durable access token
    async fn exchange_public_token(&self, public_token: &str) -> AggregatorResult<String>;

    /// Fetch holdings and security reference data for a linked item
    async fn get_investment_holdings(&self, access_token: &str)
        -> AggregatorResult<InvestmentHoldings>;
}

/// Linking flow: link tokens and the public token exchange.
#[async_trait]
pub trait AuthenticationServiceTrait: Send + Sync {
    async fn create_link_token(&self) -> Result<String>;

    /// Resolve an ephemeral public token to an access token. Not retried.
    async fn get_access_token(&self, public_token: &str) -> Result<String>;
}

/// Holdings retrieval and normalization.
#[async_trait]
pub trait InvestmentsServiceTrait: Send + Sync {
    /// Fetch and normalize holdings for an access token.
    async fn get_holdings(&self, access_token: &str) -> Result<PortfolioResult>;

    /// Exchange the public token, then fetch holdings with the resulting access token.
    async fn get_holdings_for_public_token(&self, public_token: &str) -> Result<PortfolioResult>;
}
