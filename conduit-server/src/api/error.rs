//! API Error Handling
//!
//! Unified error types and conversion for API responses.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::service::relay_service::RelayError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    BadGateway(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, challenge) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                msg,
                Some(HeaderValue::from_static("Basic realm=\"conduit\"")),
            ),
            ApiError::BadGateway(msg) => {
                tracing::error!("Upstream error: {}", msg);
                (StatusCode::BAD_GATEWAY, msg, None)
            }
        };

        let mut response = (status, Json(serde_json::json!({ "error": message }))).into_response();
        if let Some(value) = challenge {
            response.headers_mut().insert(header::WWW_AUTHENTICATE, value);
        }
        response
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::Validation(_) | RelayError::Decode(_) => {
                ApiError::BadRequest(err.to_string())
            }
            RelayError::Transport(_) => ApiError::BadGateway(err.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
