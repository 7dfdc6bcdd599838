//! Request and response bodies of the aggregator API.

use roastfolio_core::portfolio::holdings::{RawHolding, RawSecurity};
use serde::{Deserialize, Serialize};

use crate::config::LinkTokenSettings;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkTokenUser {
    pub client_user_id: String,
}

/// Body of `/link/token/create`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkTokenCreateRequest {
    pub client_name: String,
    pub user: LinkTokenUser,
    pub products: Vec<String>,
    pub country_codes: Vec<String>,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
}

impl From<&LinkTokenSettings> for LinkTokenCreateRequest {
    fn from(settings: &LinkTokenSettings) -> Self {
        Self {
            client_name: settings.client_name.clone(),
            user: LinkTokenUser {
                client_user_id: settings.client_user_id.clone(),
            },
            products: settings.products.clone(),
            country_codes: settings.country_codes.clone(),
            language: settings.language.clone(),
            redirect_uri: settings.redirect_uri.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LinkTokenCreateResponse {
    pub link_token: String,
    #[serde(default)]
    pub expiration: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PublicTokenExchangeRequest<'a> {
    pub public_token: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PublicTokenExchangeResponse {
    pub access_token: String,
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct InvestmentsHoldingsGetRequest<'a> {
    pub access_token: &'a str,
}

/// Holdings and security reference data for one linked item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvestmentHoldings {
    pub holdings: Vec<RawHolding>,
    pub securities: Vec<RawSecurity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub display_message: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}
