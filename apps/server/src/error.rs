use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roastfolio_core::errors::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => match e {
                CoreError::UpstreamAuth(_)
                | CoreError::MalformedShareLink(_)
                | CoreError::InvalidConfigValue(_) => StatusCode::BAD_REQUEST,
                CoreError::UpstreamData(_) => StatusCode::BAD_GATEWAY,
                CoreError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
                CoreError::LinkToken(_)
                | CoreError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{} {}", status, self);
        } else {
            tracing::warn!("{} {}", status, self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
