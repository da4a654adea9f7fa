//! Predictor Configuration Module
//!
//! Provides the deployment configuration loaded from a TOML file: where the
//! yield model lives, how long to wait for it, the standard operating ranges
//! used for advisories, and the gauge and message thresholds.
//!
//! ## Loading Order
//!
//! 1. `PREDICTOR_CONFIG` environment variable (path to TOML file)
//! 2. `predictor_config.toml` in the current working directory
//! 3. Built-in defaults (see [`defaults`])
//!
//! The loaded [`AppConfig`] is handed to the submission service and the HTTP
//! state at startup; there is no process-wide config handle.

mod app_config;
pub mod defaults;
pub mod validation;

pub use app_config::*;
pub use validation::ValidationWarning;
