//! API route definitions
//!
//! - /api/v1/predict - Submit reaction conditions, receive the classified report
//! - /api/v1/config  - Active ranges, gauge table and yield tiers
//! - /health         - Liveness

use axum::routing::{get, post};
use axum::Router;

use super::envelope::ApiErrorResponse;
use super::handlers::{self, ApiState};

/// Create all API routes
pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/config", get(handlers::get_config))
        .fallback(|| async { ApiErrorResponse::not_found("No such API endpoint") })
        .with_state(state)
}

/// Health endpoint at root level
pub fn health_routes(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .with_state(state)
}
