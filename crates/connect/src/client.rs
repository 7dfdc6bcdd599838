//! HTTP client for the Plaid API.
//!
//! All Plaid endpoints are JSON `POST`s authenticated with client id and
//! secret headers. Error bodies carry an `error_code` and `error_message`
//! which are kept verbatim in [`AggregatorError::Api`].

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::aggregator::models::{
    ApiErrorResponse, InvestmentHoldings, InvestmentsHoldingsGetRequest, LinkTokenCreateRequest,
    LinkTokenCreateResponse, PublicTokenExchangeRequest, PublicTokenExchangeResponse,
};
use crate::aggregator::AggregatorApiClient;
use crate::config::{PlaidConfig, PLAID_API_VERSION};
use crate::errors::{AggregatorError, AggregatorResult};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CLIENT_ID_HEADER: &str = "plaid-client-id";
const SECRET_HEADER: &str = "plaid-secret";
const VERSION_HEADER: &str = "plaid-version";

/// HTTP client for the Plaid API.
///
/// # Example
///
/// ```ignore
/// let config = PlaidConfig::new("client-id", "secret");
/// let client = PlaidApiClient::new(&config)?;
/// let access_token = client.exchange_public_token("public-sandbox-...").await?;
/// ```
#[derive(Debug, Clone)]
pub struct PlaidApiClient {
    client: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
}

impl PlaidApiClient {
    /// Create a new client from validated credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are blank or not valid header
    /// values, or if the HTTP client cannot be initialized.
    pub fn new(config: &PlaidConfig) -> AggregatorResult<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(CLIENT_ID_HEADER),
            header_value(&config.client_id, "client id")?,
        );
        let mut secret = header_value(&config.secret, "secret")?;
        secret.set_sensitive(true);
        headers.insert(HeaderName::from_static(SECRET_HEADER), secret);
        headers.insert(
            HeaderName::from_static(VERSION_HEADER),
            HeaderValue::from_static(PLAID_API_VERSION),
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .default_headers(headers.clone())
            .build()
            .map_err(|e| {
                AggregatorError::InvalidConfig(format!("Failed to initialize HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.resolved_base_url(),
            headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers sent with every request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Make a POST request and parse the response.
    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AggregatorResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[PlaidApi] POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;

        self.parse_response(response).await
    }

    /// Parse an HTTP response, handling errors appropriately.
    async fn parse_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> AggregatorResult<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            AggregatorError::Parse(format!(
                "{} - {}",
                e,
                body.chars().take(200).collect::<String>()
            ))
        })
    }
}

fn header_value(value: &str, what: &str) -> AggregatorResult<HeaderValue> {
    HeaderValue::from_str(value.trim())
        .map_err(|e| AggregatorError::InvalidConfig(format!("Invalid Plaid {}: {}", what, e)))
}

/// Builds an API error from a non-success response, preferring Plaid's own
/// error code and message over the raw body.
fn api_error(status: reqwest::StatusCode, body: &str) -> AggregatorError {
    if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(body) {
        if err.error_code.is_some() || err.error_message.is_some() {
            debug!(
                "[PlaidApi] {} error (type {:?}, request {:?})",
                status, err.error_type, err.request_id
            );
            return AggregatorError::Api {
                status: status.as_u16(),
                code: err
                    .error_code
                    .or(err.error_type)
                    .unwrap_or_else(|| "UNKNOWN_ERROR".to_string()),
                message: err
                    .error_message
                    .or(err.display_message)
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            };
        }
    }

    AggregatorError::Api {
        status: status.as_u16(),
        code: "UNKNOWN_ERROR".to_string(),
        message: body.chars().take(200).collect(),
    }
}

#[async_trait]
impl AggregatorApiClient for PlaidApiClient {
    async fn create_link_token(&self, request: &LinkTokenCreateRequest) -> AggregatorResult<String> {
        let response: LinkTokenCreateResponse = self.post("/link/token/create", request).await?;
        debug!(
            "[PlaidApi] Link token issued (expires {:?}, request {:?})",
            response.expiration, response.request_id
        );
        Ok(response.link_token)
    }

    async fn exchange_public_token(&self, public_token: &str) -> AggregatorResult<String> {
        let response: PublicTokenExchangeResponse = self
            .post(
                "/item/public_token/exchange",
                &PublicTokenExchangeRequest { public_token },
            )
            .await?;
        debug!(
            "[PlaidApi] Public token exchanged for item {:?} (request {:?})",
            response.item_id, response.request_id
        );
        Ok(response.access_token)
    }

    async fn get_investment_holdings(
        &self,
        access_token: &str,
    ) -> AggregatorResult<InvestmentHoldings> {
        self.post(
            "/investments/holdings/get",
            &InvestmentsHoldingsGetRequest { access_token },
        )
        .await
    }
}
