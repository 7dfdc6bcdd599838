use std::{net::SocketAddr, time::Duration};

use anyhow::{anyhow, bail, Context};
use roastfolio_connect::{LinkTokenSettings, PlaidConfig, PlaidEnvironment};
use roastfolio_core::constants::DEFAULT_MAX_REQUESTS;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub max_requests: u64,
    pub log_format: LogFormat,
    pub plaid: PlaidConfig,
    /// Accepted for deployments that set it; nothing reads it yet.
    pub market_data_api_key: Option<String>,
}

impl Config {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_addr: SocketAddr = var("RF_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3001".to_string())
            .parse()
            .context("Invalid RF_LISTEN_ADDR")?;
        let cors_allow = var("RF_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = match var("RF_REQUEST_TIMEOUT_MS") {
            Some(v) => v.trim().parse().context("Invalid RF_REQUEST_TIMEOUT_MS")?,
            None => 30000,
        };
        let max_requests: u64 = match var("RF_MAX_REQUESTS") {
            Some(v) => v.trim().parse().context("Invalid RF_MAX_REQUESTS")?,
            None => DEFAULT_MAX_REQUESTS,
        };
        if max_requests == 0 {
            bail!("RF_MAX_REQUESTS must be greater than zero");
        }
        let log_format = match var("RF_LOG_FORMAT").as_deref().map(str::trim) {
            None => LogFormat::Text,
            Some(f) if f.eq_ignore_ascii_case("text") => LogFormat::Text,
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(other) => bail!("Invalid RF_LOG_FORMAT '{}': expected text or json", other),
        };

        let client_id = var("PLAID_CLIENT_ID").ok_or_else(|| anyhow!("PLAID_CLIENT_ID is required"))?;
        let secret = var("PLAID_SECRET").ok_or_else(|| anyhow!("PLAID_SECRET is required"))?;
        let environment: PlaidEnvironment = match var("PLAID_ENV") {
            Some(v) => v.parse().context("Invalid PLAID_ENV")?,
            None => PlaidEnvironment::default(),
        };

        let mut link = LinkTokenSettings::default();
        if let Some(uri) = var("PLAID_REDIRECT_URI") {
            link.redirect_uri = Some(uri);
        }
        if let Some(user_id) = var("PLAID_CLIENT_USER_ID") {
            link.client_user_id = user_id;
        }

        let mut plaid = PlaidConfig::new(client_id, secret)
            .with_environment(environment)
            .with_link_settings(link);
        if let Some(base_url) = var("PLAID_BASE_URL") {
            plaid = plaid.with_base_url(base_url);
        }

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            max_requests,
            log_format,
            plaid,
            market_data_api_key: var("MARKET_DATA_API_KEY"),
        })
    }
}
