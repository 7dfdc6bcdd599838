//! Services composing aggregator calls with holdings normalization.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::models::LinkTokenCreateRequest;
use super::traits::{AggregatorApiClient, AuthenticationServiceTrait, InvestmentsServiceTrait};
use crate::config::LinkTokenSettings;
use roastfolio_core::errors::{Error, Result};
use roastfolio_core::portfolio::holdings::{normalize_holdings, PortfolioResult};

/// Link token creation and public token exchange.
pub struct AuthenticationService {
    client: Arc<dyn AggregatorApiClient>,
    link_settings: LinkTokenSettings,
}

impl AuthenticationService {
    pub fn new(client: Arc<dyn AggregatorApiClient>, link_settings: LinkTokenSettings) -> Self {
        Self {
            client,
            link_settings,
        }
    }
}

#[async_trait]
impl AuthenticationServiceTrait for AuthenticationService {
    async fn create_link_token(&self) -> Result<String> {
        let request = LinkTokenCreateRequest::from(&self.link_settings);
        let link_token = self.client.create_link_token(&request).await.map_err(|e| {
            warn!("[Auth] Link token creation failed: {}", e);
            Error::LinkToken(e.to_string())
        })?;
        info!("[Auth] Created link token for '{}'", self.link_settings.client_user_id);
        Ok(link_token)
    }

    async fn get_access_token(&self, public_token: &str) -> Result<String> {
        if public_token.trim().is_empty() {
            return Err(Error::UpstreamAuth("public token is empty".to_string()));
        }

        let access_token = self
            .client
            .exchange_public_token(public_token)
            .await
            .map_err(|e| {
                warn!("[Auth] Public token exchange failed: {}", e);
                Error::UpstreamAuth(e.to_string())
            })?;
        debug!("[Auth] Public token exchanged");
        Ok(access_token)
    }
}

/// Fetches holdings from the aggregator and normalizes them.
pub struct InvestmentsService {
    client: Arc<dyn AggregatorApiClient>,
    authentication_service: Arc<dyn AuthenticationServiceTrait>,
}

impl InvestmentsService {
    pub fn new(
        client: Arc<dyn AggregatorApiClient>,
        authentication_service: Arc<dyn AuthenticationServiceTrait>,
    ) -> Self {
        Self {
            client,
            authentication_service,
        }
    }
}

#[async_trait]
impl InvestmentsServiceTrait for InvestmentsService {
    async fn get_holdings(&self, access_token: &str) -> Result<PortfolioResult> {
        let response = self
            .client
            .get_investment_holdings(access_token)
            .await
            .map_err(|e| {
                warn!("[Investments] Holdings fetch failed: {}", e);
                Error::UpstreamData(e.to_string())
            })?;

        debug!(
            "[Investments] Received {} holdings and {} securities (request {:?})",
            response.holdings.len(),
            response.securities.len(),
            response.request_id
        );

        let result = normalize_holdings(&response.holdings, &response.securities);
        info!(
            "[Investments] Normalized {} holdings, total P&L {}",
            result.holdings.len(),
            result.total_pl
        );
        Ok(result)
    }

    async fn get_holdings_for_public_token(&self, public_token: &str) -> Result<PortfolioResult> {
        let access_token = self
            .authentication_service
            .get_access_token(public_token)
            .await?;
        self.get_holdings(&access_token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::models::InvestmentHoldings;
    use crate::errors::{AggregatorError, AggregatorResult};
    use roastfolio_core::portfolio::holdings::{RawHolding, RawSecurity};
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    /// Records calls and replays canned responses.
    #[derive(Default)]
    struct MockAggregator {
        calls: Mutex<Vec<String>>,
        link_failure: Option<AggregatorError>,
        exchange_failure: Option<AggregatorError>,
        holdings_failure: Option<AggregatorError>,
        last_link_request: Mutex<Option<LinkTokenCreateRequest>>,
    }

    impl MockAggregator {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AggregatorApiClient for MockAggregator {
        async fn create_link_token(
            &self,
            request: &LinkTokenCreateRequest,
        ) -> AggregatorResult<String> {
            self.calls.lock().unwrap().push("link".to_string());
            *self.last_link_request.lock().unwrap() = Some(request.clone());
            match &self.link_failure {
                Some(e) => Err(e.clone()),
                None => Ok("link-sandbox-123".to_string()),
            }
        }

        async fn exchange_public_token(&self, public_token: &str) -> AggregatorResult<String> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("exchange:{}", public_token));
            match &self.exchange_failure {
                Some(e) => Err(e.clone()),
                None => Ok(format!("access-for-{}", public_token)),
            }
        }

        async fn get_investment_holdings(
            &self,
            access_token: &str,
        ) -> AggregatorResult<InvestmentHoldings> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("holdings:{}", access_token));
            if let Some(e) = &self.holdings_failure {
                return Err(e.clone());
            }
            Ok(InvestmentHoldings {
                holdings: vec![RawHolding {
                    security_id: "A".to_string(),
                    institution_value: dec!(100),
                    institution_price: Some(dec!(10)),
                    cost_basis: Some(dec!(50)),
                    quantity: dec!(10),
                    account_id: None,
                    iso_currency_code: None,
                }],
                securities: vec![RawSecurity {
                    security_id: "A".to_string(),
                    ticker_symbol: Some("AAA".to_string()),
                    name: None,
                    sector: None,
                    close_price: Some(dec!(12)),
                    security_type: None,
                    iso_currency_code: None,
                }],
                request_id: Some("req-1".to_string()),
            })
        }
    }

    fn services(mock: Arc<MockAggregator>) -> (Arc<AuthenticationService>, InvestmentsService) {
        let auth = Arc::new(AuthenticationService::new(
            mock.clone(),
            LinkTokenSettings::default(),
        ));
        let investments = InvestmentsService::new(mock, auth.clone());
        (auth, investments)
    }

    #[tokio::test]
    async fn link_token_uses_configured_settings() {
        let mock = Arc::new(MockAggregator::default());
        let (auth, _) = services(mock.clone());

        assert_eq!(auth.create_link_token().await.unwrap(), "link-sandbox-123");

        let request = mock.last_link_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.client_name, "Roast My Portfolio");
        assert_eq!(request.products, vec!["investments".to_string()]);
        assert_eq!(request.country_codes, vec!["US".to_string()]);
    }

    #[tokio::test]
    async fn link_token_failure_is_reported() {
        let mock = Arc::new(MockAggregator {
            link_failure: Some(AggregatorError::Timeout),
            ..Default::default()
        });
        let (auth, _) = services(mock);

        let err = auth.create_link_token().await.unwrap_err();
        assert_eq!(err, Error::LinkToken("Request timed out".to_string()));
    }

    #[tokio::test]
    async fn exchanges_then_fetches_in_order() {
        let mock = Arc::new(MockAggregator::default());
        let (_, investments) = services(mock.clone());

        let result = investments
            .get_holdings_for_public_token("public-sandbox-1")
            .await
            .unwrap();

        assert_eq!(
            mock.calls(),
            vec![
                "exchange:public-sandbox-1".to_string(),
                "holdings:access-for-public-sandbox-1".to_string(),
            ]
        );
        assert_eq!(result.total_pl, dec!(-380));
        assert_eq!(result.holdings[0].name, "Security A");
        assert_eq!(result.holdings[0].percentage_pl, dec!(100));
    }

    #[tokio::test]
    async fn failed_exchange_skips_holdings_fetch() {
        let mock = Arc::new(MockAggregator {
            exchange_failure: Some(AggregatorError::Api {
                status: 400,
                code: "INVALID_PUBLIC_TOKEN".to_string(),
                message: "provided public token is expired".to_string(),
            }),
            ..Default::default()
        });
        let (_, investments) = services(mock.clone());

        let err = investments
            .get_holdings_for_public_token("public-expired")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UpstreamAuth(_)));
        assert_eq!(
            err.to_string(),
            "Error getting access token: HTTP 400 [INVALID_PUBLIC_TOKEN]: provided public token is expired"
        );
        assert_eq!(mock.calls(), vec!["exchange:public-expired".to_string()]);
    }

    #[tokio::test]
    async fn blank_public_token_never_reaches_upstream() {
        let mock = Arc::new(MockAggregator::default());
        let (auth, _) = services(mock.clone());

        let err = auth.get_access_token("  ").await.unwrap_err();

        assert!(matches!(err, Error::UpstreamAuth(_)));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn holdings_failure_is_wrapped_as_data_error() {
        let mock = Arc::new(MockAggregator {
            holdings_failure: Some(AggregatorError::Parse("missing field `holdings`".to_string())),
            ..Default::default()
        });
        let (_, investments) = services(mock);

        let err = investments.get_holdings("access-1").await.unwrap_err();

        assert_eq!(
            err,
            Error::UpstreamData(
                "Failed to parse response: missing field `holdings`".to_string()
            )
        );
    }
}
