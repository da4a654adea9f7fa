//! System state endpoints: health, active configuration

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::api::envelope::ApiResponse;
use crate::config::{defaults, GaugeTable, StandardRanges, YieldTierThresholds};
use crate::validator::range_advisory_message;

use super::ApiState;

// ============================================================================
// Health Endpoint
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// GET /health - Liveness check
pub async fn health_check(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

// ============================================================================
// Config Endpoint
// ============================================================================

/// What the form page needs to draw ranges and gauge dials.
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    /// Model endpoint the server forwards to
    pub endpoint: String,
    /// Per-call timeout (seconds)
    pub timeout_secs: u64,
    pub standard_ranges: StandardRanges,
    pub gauges: GaugeTable,
    pub yield_tiers: YieldTierThresholds,
    /// Advisory shown when an input falls outside `standard_ranges`
    pub range_advisory: String,
    /// Thermodynamic ceiling for this plant (%), informational
    pub max_achievable_yield: f64,
}

/// GET /api/v1/config - Active thresholds and ranges
pub async fn get_config(State(state): State<ApiState>) -> Response {
    let cfg = state.submissions.config();
    ApiResponse::ok(ConfigResponse {
        endpoint: cfg.prediction.endpoint.clone(),
        timeout_secs: cfg.prediction.timeout_secs,
        standard_ranges: cfg.standard_ranges.clone(),
        gauges: cfg.gauges.clone(),
        yield_tiers: cfg.yield_tiers,
        range_advisory: range_advisory_message(&cfg.standard_ranges),
        max_achievable_yield: defaults::MAX_ACHIEVABLE_YIELD_PERCENT,
    })
}
