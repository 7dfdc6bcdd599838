use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use roastfolio_core::portfolio::holdings::PortfolioResult;
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
struct InvestmentsQuery {
    #[serde(rename = "publicToken")]
    public_token: Option<String>,
}

async fn get_investments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InvestmentsQuery>,
) -> ApiResult<Json<PortfolioResult>> {
    let public_token = query
        .public_token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Access token is required".to_string()))?;

    let result = state
        .investments_service
        .get_holdings_for_public_token(&public_token)
        .await?;
    tracing::info!(
        "Returning {} holdings (total P&L {})",
        result.holdings.len(),
        result.total_pl
    );
    Ok(Json(result))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/investments", get(get_investments))
}
