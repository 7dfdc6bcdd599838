//! Aggregator connection settings.

use std::fmt;
use std::str::FromStr;

use crate::errors::AggregatorError;

/// API version pinned on every request.
pub const PLAID_API_VERSION: &str = "2020-09-14";

/// Plaid deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaidEnvironment {
    #[default]
    Sandbox,
    Development,
    Production,
}

impl PlaidEnvironment {
    pub fn base_url(&self) -> &'static str {
        match self {
            PlaidEnvironment::Sandbox => "https://sandbox.plaid.com",
            PlaidEnvironment::Development => "https://development.plaid.com",
            PlaidEnvironment::Production => "https://production.plaid.com",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaidEnvironment::Sandbox => "sandbox",
            PlaidEnvironment::Development => "development",
            PlaidEnvironment::Production => "production",
        }
    }
}

impl FromStr for PlaidEnvironment {
    type Err = AggregatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(PlaidEnvironment::Sandbox),
            "development" => Ok(PlaidEnvironment::Development),
            "production" => Ok(PlaidEnvironment::Production),
            other => Err(AggregatorError::InvalidConfig(format!(
                "unknown Plaid environment '{}' (expected sandbox, development or production)",
                other
            ))),
        }
    }
}

impl fmt::Display for PlaidEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the link widget is opened for.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkTokenSettings {
    pub client_name: String,
    pub client_user_id: String,
    pub redirect_uri: Option<String>,
    pub products: Vec<String>,
    pub country_codes: Vec<String>,
    pub language: String,
}

impl Default for LinkTokenSettings {
    fn default() -> Self {
        Self {
            client_name: "Roast My Portfolio".to_string(),
            client_user_id: "user-id".to_string(),
            redirect_uri: Some("https://localhost:3001/".to_string()),
            products: vec!["investments".to_string()],
            country_codes: vec!["US".to_string()],
            language: "en".to_string(),
        }
    }
}

/// Credentials and endpoints for the Plaid API.
#[derive(Clone, PartialEq)]
pub struct PlaidConfig {
    pub client_id: String,
    pub secret: String,
    pub environment: PlaidEnvironment,
    /// Overrides the environment URL, e.g. for a local stand-in.
    pub base_url: Option<String>,
    pub link: LinkTokenSettings,
}

impl PlaidConfig {
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            secret: secret.into(),
            environment: PlaidEnvironment::default(),
            base_url: None,
            link: LinkTokenSettings::default(),
        }
    }

    pub fn with_environment(mut self, environment: PlaidEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_link_settings(mut self, link: LinkTokenSettings) -> Self {
        self.link = link;
        self
    }

    /// Base URL requests are sent to, without a trailing slash.
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
            .to_string()
    }

    pub fn validate(&self) -> Result<(), AggregatorError> {
        if self.client_id.trim().is_empty() {
            return Err(AggregatorError::InvalidConfig(
                "Plaid client id is empty".to_string(),
            ));
        }
        if self.secret.trim().is_empty() {
            return Err(AggregatorError::InvalidConfig(
                "Plaid secret is empty".to_string(),
            ));
        }
        Ok(())
    }
}

// Keeps the secret out of logs.
impl fmt::Debug for PlaidConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaidConfig")
            .field("client_id", &self.client_id)
            .field("secret", &"***")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("link", &self.link)
            .finish()
    }
}
