//! System-wide default constants.
//!
//! Centralises the literals the predictor ships with. Every value here can be
//! overridden from `predictor_config.toml`.

// ============================================================================
// Server
// ============================================================================

/// HTTP server bind address.
pub const SERVER_ADDR: &str = "0.0.0.0:8080";

// ============================================================================
// Prediction Service
// ============================================================================

/// Remote yield model endpoint.
pub const PREDICTION_ENDPOINT: &str = "https://methanol-yield-prediction.onrender.com/predict";

/// Ceiling on a single prediction call (seconds).
///
/// The hosted model sleeps when idle, so the first call after a quiet period
/// can take most of this budget.
pub const PREDICTION_TIMEOUT_SECS: u64 = 15;

// ============================================================================
// Standard Operating Ranges (double-pass PFR)
// ============================================================================

pub const TEMPERATURE_MIN_K: f64 = 473.0;
pub const TEMPERATURE_MAX_K: f64 = 573.0;

pub const PRESSURE_MIN_BAR: f64 = 50.0;
pub const PRESSURE_MAX_BAR: f64 = 150.0;

pub const RESIDENCE_TIME_MIN_S: f64 = 1.0;
pub const RESIDENCE_TIME_MAX_S: f64 = 30.0;

/// Thermodynamic ceiling on methanol yield for this plant (%). Informational.
pub const MAX_ACHIEVABLE_YIELD_PERCENT: f64 = 75.0;

// ============================================================================
// Gauge Table: (max, medium, good)
// ============================================================================

pub const YIELD_GAUGE: (f64, f64, f64) = (100.0, 50.0, 65.0);
pub const TEMPERATURE_GAUGE: (f64, f64, f64) = (700.0, 470.0, 548.0);
pub const PRESSURE_GAUGE: (f64, f64, f64) = (150.0, 40.0, 60.0);
pub const RESIDENCE_TIME_1_GAUGE: (f64, f64, f64) = (30.0, 10.0, 18.0);
pub const RESIDENCE_TIME_2_GAUGE: (f64, f64, f64) = (30.0, 5.0, 10.0);

// ============================================================================
// Yield Message Tiers
// ============================================================================

/// Yield at or above this is reported as manageable (%).
///
/// Kept separate from the yield gauge's medium cutoff even though the two
/// currently agree.
pub const YIELD_TIER_MANAGEABLE: f64 = 50.0;

/// Yield at or above this is reported as high (%).
pub const YIELD_TIER_HIGH: f64 = 65.0;
