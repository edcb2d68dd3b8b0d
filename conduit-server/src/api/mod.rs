//! API Module
//!
//! HTTP adapter for the relay.
//! Each submodule handles endpoints for a specific concern.

pub mod error;
pub mod health;
pub mod submit;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::service::relay_service::RelayService;

/// Create the main API router with all endpoints
pub fn create_router(relay: Arc<RelayService>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Submission endpoints
        .route("/api/submit", post(submit::submit))
        .route("/api/submit/raw", post(submit::submit_raw))
        // Add state and middleware
        .with_state(relay)
        .layer(TraceLayer::new_for_http())
}
