use std::sync::Arc;

use roastfolio_connect::{
    AuthenticationService, AuthenticationServiceTrait, InvestmentsService,
    InvestmentsServiceTrait, PlaidApiClient,
};
use roastfolio_core::rate_limit::RequestBudget;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LogFormat};

pub struct AppState {
    pub authentication_service: Arc<dyn AuthenticationServiceTrait + Send + Sync>,
    pub investments_service: Arc<dyn InvestmentsServiceTrait + Send + Sync>,
    /// Shared by every upstream-hitting route.
    pub request_budget: Arc<RequestBudget>,
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let client = Arc::new(PlaidApiClient::new(&config.plaid)?);
    tracing::info!(
        "Plaid {} environment at {}",
        config.plaid.environment,
        client.base_url()
    );

    let authentication_service = Arc::new(AuthenticationService::new(
        client.clone(),
        config.plaid.link.clone(),
    ));
    let investments_service = Arc::new(InvestmentsService::new(
        client,
        authentication_service.clone(),
    ));

    if config.market_data_api_key.is_some() {
        tracing::debug!("MARKET_DATA_API_KEY is set but not used");
    }
    tracing::info!("Request budget: {} upstream requests", config.max_requests);

    Ok(Arc::new(AppState {
        authentication_service,
        investments_service,
        request_budget: Arc::new(RequestBudget::new(config.max_requests)),
    }))
}
