use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LinkResponse {
    link_token: String,
}

async fn get_plaid_oauth_link(State(state): State<Arc<AppState>>) -> ApiResult<Json<LinkResponse>> {
    let link_token = state.authentication_service.create_link_token().await?;
    Ok(Json(LinkResponse { link_token }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/plaid_oauth_link", get(get_plaid_oauth_link))
}
