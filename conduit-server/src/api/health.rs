//! Health Check API Handler
//!
//! Liveness endpoint. It does not probe the job server.

use axum::{http::StatusCode, response::IntoResponse};

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
