//! Predictor Configuration - service endpoint, ranges and gauge thresholds as TOML values
//!
//! Every literal the form and gauges depend on is a field in this module.
//! Each struct implements `Default` with the values in [`super::defaults`],
//! so a missing config file yields the stock behaviour.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use super::defaults;
use crate::types::Metric;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "PREDICTOR_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "predictor_config.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a predictor deployment.
///
/// Load with `AppConfig::load()` which searches:
/// 1. `$PREDICTOR_CONFIG` env var
/// 2. `./predictor_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote yield model
    #[serde(default)]
    pub prediction: PredictionServiceConfig,

    /// Standard PFR operating ranges (advisory only)
    #[serde(default)]
    pub standard_ranges: StandardRanges,

    /// Per-metric gauge scale and band cutoffs
    #[serde(default)]
    pub gauges: GaugeTable,

    /// Top-level yield message tiers
    #[serde(default)]
    pub yield_tiers: YieldTierThresholds,
}

impl AppConfig {
    /// Load configuration using the standard search order:
    /// 1. `$PREDICTOR_CONFIG` environment variable
    /// 2. `./predictor_config.toml` in the current working directory
    /// 3. Built-in defaults
    ///
    /// A source that does not exist is skipped. A file that exists but fails
    /// to parse or validate is an error; it never falls back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let env_path = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        Self::load_from_sources(env_path.as_deref(), Path::new(LOCAL_CONFIG_FILE))
    }

    /// Search order behind [`AppConfig::load`], with the candidate paths
    /// passed in.
    pub fn load_from_sources(env_path: Option<&Path>, local: &Path) -> Result<Self, ConfigError> {
        // 1. Explicit path from the environment
        if let Some(p) = env_path {
            if p.exists() {
                let config = Self::load_from_file(p)?;
                info!(path = %p.display(), "Loaded predictor config from {}", CONFIG_PATH_ENV);
                return Ok(config);
            }
            warn!(path = %p.display(), "{} points to non-existent file, falling back", CONFIG_PATH_ENV);
        }

        // 2. Local file
        if local.exists() {
            let config = Self::load_from_file(local)?;
            info!(path = %local.display(), "Loaded predictor config");
            return Ok(config);
        }

        // 3. Defaults
        info!("No {} found — using built-in defaults", LOCAL_CONFIG_FILE);
        Ok(Self::default())
    }

    /// Load from a specific TOML file path, logging any warnings.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let (config, warnings) = Self::load_from_file_with_warnings(path)?;
        for w in &warnings {
            warn!("{}", w);
        }
        Ok(config)
    }

    /// Load from a specific TOML file path, returning the non-fatal warnings
    /// (unknown keys, diverging thresholds) instead of logging them.
    pub fn load_from_file_with_warnings(
        path: &Path,
    ) -> Result<(Self, Vec<super::ValidationWarning>), ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Two passes: unknown keys are collected as warnings first, then the
    /// document is deserialized and validated.
    pub fn from_toml_str(
        contents: &str,
    ) -> Result<(Self, Vec<super::ValidationWarning>), ConfigError> {
        let mut warnings = super::validation::validate_unknown_keys(contents);

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;

        warnings.extend(super::validation::check_threshold_consistency(&config));
        Ok((config, warnings))
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate all values for internal consistency.
    ///
    /// Rules:
    /// - Every number must be finite
    /// - Gauges: `0 < max`, `medium <= good <= max`
    /// - Ranges: `min <= max`
    /// - Yield tiers: `manageable <= high`
    /// - Timeout must be > 0 and the endpoint an http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        for metric in Metric::ALL {
            let g = self.gauges.get(metric);
            let name = format!("gauges.{}", metric.config_key());
            if !g.max.is_finite() || !g.medium.is_finite() || !g.good.is_finite() {
                errors.push(format!(
                    "{name}: values must be finite (got max={}, medium={}, good={})",
                    g.max, g.medium, g.good
                ));
                continue;
            }
            if g.max <= 0.0 {
                errors.push(format!("{name}.max = {} must be > 0", g.max));
            }
            if g.medium > g.good {
                errors.push(format!(
                    "{name}: medium ({}) must be <= good ({})",
                    g.medium, g.good
                ));
            }
            if g.good > g.max {
                errors.push(format!(
                    "{name}: good ({}) must be <= max ({})",
                    g.good, g.max
                ));
            }
        }

        for metric in Metric::INPUTS {
            if let Some(r) = self.standard_ranges.get(metric) {
                let name = format!("standard_ranges.{}", metric.config_key());
                if !r.min.is_finite() || !r.max.is_finite() {
                    errors.push(format!(
                        "{name}: values must be finite (got min={}, max={})",
                        r.min, r.max
                    ));
                } else if r.min > r.max {
                    errors.push(format!("{name}: min ({}) must be <= max ({})", r.min, r.max));
                }
            }
        }

        let t = &self.yield_tiers;
        if !t.manageable.is_finite() || !t.high.is_finite() {
            errors.push(format!(
                "yield_tiers: values must be finite (got manageable={}, high={})",
                t.manageable, t.high
            ));
        } else if t.manageable > t.high {
            errors.push(format!(
                "yield_tiers: manageable ({}) must be <= high ({})",
                t.manageable, t.high
            ));
        }

        if self.prediction.timeout_secs == 0 {
            errors.push("prediction.timeout_secs must be > 0".to_string());
        }
        match reqwest::Url::parse(&self.prediction.endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(format!(
                "prediction.endpoint: unsupported scheme '{}' (expected http or https)",
                url.scheme()
            )),
            Err(e) => errors.push(format!(
                "prediction.endpoint = '{}' is not a valid URL: {e}",
                self.prediction.endpoint
            )),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, std::io::Error),
    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, toml::de::Error),
    #[error("Config serialization error: {0}")]
    Serialize(toml::ser::Error),
    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Server
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address.
    ///
    /// Can be overridden by `PREDICTOR_SERVER_ADDR` env var or `--addr` CLI flag.
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_server_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}

// ============================================================================
// Prediction Service
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionServiceConfig {
    /// Full URL of the model's predict route.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Ceiling on one prediction call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    defaults::PREDICTION_ENDPOINT.to_string()
}

const fn default_timeout_secs() -> u64 {
    defaults::PREDICTION_TIMEOUT_SECS
}

impl PredictionServiceConfig {
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for PredictionServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ============================================================================
// Standard Operating Ranges
// ============================================================================

/// Inclusive `[min, max]` interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingRange {
    pub min: f64,
    pub max: f64,
}

impl OperatingRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardRanges {
    #[serde(default = "default_temperature_range")]
    pub temperature: OperatingRange,
    #[serde(default = "default_pressure_range")]
    pub pressure: OperatingRange,
    #[serde(default = "default_residence_time_range")]
    pub residence_time_1: OperatingRange,
    #[serde(default = "default_residence_time_range")]
    pub residence_time_2: OperatingRange,
}

const fn default_temperature_range() -> OperatingRange {
    OperatingRange::new(defaults::TEMPERATURE_MIN_K, defaults::TEMPERATURE_MAX_K)
}

const fn default_pressure_range() -> OperatingRange {
    OperatingRange::new(defaults::PRESSURE_MIN_BAR, defaults::PRESSURE_MAX_BAR)
}

const fn default_residence_time_range() -> OperatingRange {
    OperatingRange::new(defaults::RESIDENCE_TIME_MIN_S, defaults::RESIDENCE_TIME_MAX_S)
}

impl StandardRanges {
    /// Range for an input metric; `None` for the predicted yield.
    pub const fn get(&self, metric: Metric) -> Option<&OperatingRange> {
        match metric {
            Metric::Yield => None,
            Metric::Temperature => Some(&self.temperature),
            Metric::Pressure => Some(&self.pressure),
            Metric::ResidenceTime1 => Some(&self.residence_time_1),
            Metric::ResidenceTime2 => Some(&self.residence_time_2),
        }
    }
}

impl Default for StandardRanges {
    fn default() -> Self {
        Self {
            temperature: default_temperature_range(),
            pressure: default_pressure_range(),
            residence_time_1: default_residence_time_range(),
            residence_time_2: default_residence_time_range(),
        }
    }
}

// ============================================================================
// Gauge Table
// ============================================================================

/// Gauge scale `0..max` and the two band cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeThresholds {
    pub max: f64,
    pub medium: f64,
    pub good: f64,
}

impl GaugeThresholds {
    pub const fn new(max: f64, medium: f64, good: f64) -> Self {
        Self { max, medium, good }
    }

    const fn from_tuple((max, medium, good): (f64, f64, f64)) -> Self {
        Self::new(max, medium, good)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeTable {
    #[serde(rename = "yield", default = "default_yield_gauge")]
    pub yield_percent: GaugeThresholds,
    #[serde(default = "default_temperature_gauge")]
    pub temperature: GaugeThresholds,
    #[serde(default = "default_pressure_gauge")]
    pub pressure: GaugeThresholds,
    #[serde(default = "default_residence_time_1_gauge")]
    pub residence_time_1: GaugeThresholds,
    #[serde(default = "default_residence_time_2_gauge")]
    pub residence_time_2: GaugeThresholds,
}

const fn default_yield_gauge() -> GaugeThresholds {
    GaugeThresholds::from_tuple(defaults::YIELD_GAUGE)
}

const fn default_temperature_gauge() -> GaugeThresholds {
    GaugeThresholds::from_tuple(defaults::TEMPERATURE_GAUGE)
}

const fn default_pressure_gauge() -> GaugeThresholds {
    GaugeThresholds::from_tuple(defaults::PRESSURE_GAUGE)
}

const fn default_residence_time_1_gauge() -> GaugeThresholds {
    GaugeThresholds::from_tuple(defaults::RESIDENCE_TIME_1_GAUGE)
}

const fn default_residence_time_2_gauge() -> GaugeThresholds {
    GaugeThresholds::from_tuple(defaults::RESIDENCE_TIME_2_GAUGE)
}

impl GaugeTable {
    pub const fn get(&self, metric: Metric) -> &GaugeThresholds {
        match metric {
            Metric::Yield => &self.yield_percent,
            Metric::Temperature => &self.temperature,
            Metric::Pressure => &self.pressure,
            Metric::ResidenceTime1 => &self.residence_time_1,
            Metric::ResidenceTime2 => &self.residence_time_2,
        }
    }
}

impl Default for GaugeTable {
    fn default() -> Self {
        Self {
            yield_percent: default_yield_gauge(),
            temperature: default_temperature_gauge(),
            pressure: default_pressure_gauge(),
            residence_time_1: default_residence_time_1_gauge(),
            residence_time_2: default_residence_time_2_gauge(),
        }
    }
}

// ============================================================================
// Yield Message Tiers
// ============================================================================

/// Cutoffs for the headline yield message. Independent of `gauges.yield`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldTierThresholds {
    #[serde(default = "default_tier_manageable")]
    pub manageable: f64,
    #[serde(default = "default_tier_high")]
    pub high: f64,
}

const fn default_tier_manageable() -> f64 {
    defaults::YIELD_TIER_MANAGEABLE
}

const fn default_tier_high() -> f64 {
    defaults::YIELD_TIER_HIGH
}

impl Default for YieldTierThresholds {
    fn default() -> Self {
        Self {
            manageable: default_tier_manageable(),
            high: default_tier_high(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
