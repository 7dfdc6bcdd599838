#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use roastfolio_connect::{AuthenticationServiceTrait, InvestmentsServiceTrait};
use roastfolio_core::{
    errors::{Error, Result},
    portfolio::holdings::{NormalizedHolding, PortfolioResult},
    rate_limit::RequestBudget,
};
use roastfolio_server::{api::app_router, config::Config, AppState};
use rust_decimal_macros::dec;
use serde_json::Value;
use tower::ServiceExt;

/// Answers every call with a canned outcome.
#[derive(Default)]
pub struct StubAggregator {
    pub link_error: Option<Error>,
    pub holdings_error: Option<Error>,
    pub calls: AtomicUsize,
}

impl StubAggregator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthenticationServiceTrait for StubAggregator {
    async fn create_link_token(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.link_error {
            Some(e) => Err(e.clone()),
            None => Ok("link-sandbox-abc".to_string()),
        }
    }

    async fn get_access_token(&self, public_token: &str) -> Result<String> {
        Ok(format!("access-for-{}", public_token))
    }
}

#[async_trait]
impl InvestmentsServiceTrait for StubAggregator {
    async fn get_holdings(&self, _access_token: &str) -> Result<PortfolioResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = &self.holdings_error {
            return Err(e.clone());
        }
        Ok(PortfolioResult {
            holdings: vec![NormalizedHolding {
                ticker: Some("AAA".to_string()),
                name: "Alpha".to_string(),
                security_id: "s1".to_string(),
                sector: Some("Tech".to_string()),
                price: Some(dec!(100)),
                percentage: dec!(100),
                percentage_pl: dec!(100),
            }],
            total_pl: dec!(200),
        })
    }

    async fn get_holdings_for_public_token(&self, public_token: &str) -> Result<PortfolioResult> {
        let access_token = self.get_access_token(public_token).await?;
        self.get_holdings(&access_token).await
    }
}

pub fn test_config(max_requests: u64) -> Config {
    let max_requests = max_requests.to_string();
    Config::from_lookup(|key| match key {
        "PLAID_CLIENT_ID" => Some("client".to_string()),
        "PLAID_SECRET" => Some("secret".to_string()),
        "RF_MAX_REQUESTS" => Some(max_requests.clone()),
        _ => None,
    })
    .unwrap()
}

pub fn test_app(stub: Arc<StubAggregator>, max_requests: u64) -> Router {
    let config = test_config(max_requests);
    let state = Arc::new(AppState {
        authentication_service: stub.clone(),
        investments_service: stub,
        request_budget: Arc::new(RequestBudget::new(config.max_requests)),
    });
    app_router(state, &config)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
