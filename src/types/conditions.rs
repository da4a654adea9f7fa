//! Reaction conditions, the raw form submission, and the model's wire format

use serde::{Deserialize, Serialize};

// ============================================================================
// Metrics
// ============================================================================

/// One of the five quantities shown on a gauge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Metric {
    #[serde(rename = "yield")]
    Yield,
    #[serde(rename = "temperature")]
    Temperature,
    #[serde(rename = "pressure")]
    Pressure,
    #[serde(rename = "residence_time_1")]
    ResidenceTime1,
    #[serde(rename = "residence_time_2")]
    ResidenceTime2,
}

impl Metric {
    /// Display order of the gauge panel.
    pub const ALL: [Self; 5] = [
        Self::Yield,
        Self::Temperature,
        Self::Pressure,
        Self::ResidenceTime1,
        Self::ResidenceTime2,
    ];

    /// The four operator inputs, in form order.
    pub const INPUTS: [Self; 4] = [
        Self::Temperature,
        Self::Pressure,
        Self::ResidenceTime1,
        Self::ResidenceTime2,
    ];

    /// Key used in config tables and JSON payloads.
    pub const fn config_key(self) -> &'static str {
        match self {
            Self::Yield => "yield",
            Self::Temperature => "temperature",
            Self::Pressure => "pressure",
            Self::ResidenceTime1 => "residence_time_1",
            Self::ResidenceTime2 => "residence_time_2",
        }
    }

    /// Gauge title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Yield => "Methanol Yield (%)",
            Self::Temperature => "Temperature (K)",
            Self::Pressure => "Pressure (bar)",
            Self::ResidenceTime1 => "Residence Time 1 (s)",
            Self::ResidenceTime2 => "Residence Time 2 (s)",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::Yield => "%",
            Self::Temperature => "K",
            Self::Pressure => "bar",
            Self::ResidenceTime1 | Self::ResidenceTime2 => "s",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

// ============================================================================
// Operator Inputs
// ============================================================================

/// The four reaction parameters of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactionConditions {
    /// Reactor temperature (K)
    pub temperature: f64,
    /// Operating pressure (bar)
    pub pressure: f64,
    /// Time spent in the first reactor pass (s)
    pub residence_time_1: f64,
    /// Time spent in the second reactor pass (s)
    pub residence_time_2: f64,
}

impl ReactionConditions {
    pub const fn new(
        temperature: f64,
        pressure: f64,
        residence_time_1: f64,
        residence_time_2: f64,
    ) -> Self {
        Self {
            temperature,
            pressure,
            residence_time_1,
            residence_time_2,
        }
    }

    /// Value of an input metric; `None` for [`Metric::Yield`].
    pub const fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Yield => None,
            Metric::Temperature => Some(self.temperature),
            Metric::Pressure => Some(self.pressure),
            Metric::ResidenceTime1 => Some(self.residence_time_1),
            Metric::ResidenceTime2 => Some(self.residence_time_2),
        }
    }

    /// `(metric, value)` pairs in form order.
    pub const fn fields(&self) -> [(Metric, f64); 4] {
        [
            (Metric::Temperature, self.temperature),
            (Metric::Pressure, self.pressure),
            (Metric::ResidenceTime1, self.residence_time_1),
            (Metric::ResidenceTime2, self.residence_time_2),
        ]
    }
}

/// Raw form submission. Any field may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionsForm {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub residence_time_1: Option<f64>,
    #[serde(default)]
    pub residence_time_2: Option<f64>,
}

impl ConditionsForm {
    /// Complete the form, or list the fields that were left empty.
    pub fn complete(&self) -> Result<ReactionConditions, Vec<Metric>> {
        match (
            self.temperature,
            self.pressure,
            self.residence_time_1,
            self.residence_time_2,
        ) {
            (Some(t), Some(p), Some(r1), Some(r2)) => Ok(ReactionConditions::new(t, p, r1, r2)),
            (t, p, r1, r2) => Err([
                (Metric::Temperature, t),
                (Metric::Pressure, p),
                (Metric::ResidenceTime1, r1),
                (Metric::ResidenceTime2, r2),
            ]
            .into_iter()
            .filter(|(_, v)| v.is_none())
            .map(|(m, _)| m)
            .collect()),
        }
    }
}

impl From<ReactionConditions> for ConditionsForm {
    fn from(c: ReactionConditions) -> Self {
        Self {
            temperature: Some(c.temperature),
            pressure: Some(c.pressure),
            residence_time_1: Some(c.residence_time_1),
            residence_time_2: Some(c.residence_time_2),
        }
    }
}

// ============================================================================
// Model Wire Format
// ============================================================================

/// Request body of the model's predict route. Key names are fixed by the
/// model service and must match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "Temperature (K)")]
    pub temperature: f64,
    #[serde(rename = "Pressure (bar)")]
    pub pressure: f64,
    #[serde(rename = "Residence Time (s)_1")]
    pub residence_time_1: f64,
    #[serde(rename = "Residence Time (s)_2")]
    pub residence_time_2: f64,
}

impl From<&ReactionConditions> for PredictionRequest {
    fn from(c: &ReactionConditions) -> Self {
        Self {
            temperature: c.temperature,
            pressure: c.pressure,
            residence_time_1: c.residence_time_1,
            residence_time_2: c.residence_time_2,
        }
    }
}

/// Successful response body of the model's predict route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Yield with a trailing unit character, e.g. `"42.50%"`.
    #[serde(rename = "Predicted Percentage yield")]
    pub predicted_yield: String,
}

impl PredictionResponse {
    /// Predicted yield in percent.
    pub fn yield_percent(&self) -> Result<f64, YieldParseError> {
        parse_yield_text(&self.predicted_yield)
    }
}

/// The model's yield string could not be read as a number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum YieldParseError {
    #[error("yield value is empty")]
    Empty,
    #[error("yield value '{0}' is not a number")]
    NotANumber(String),
    #[error("yield value '{0}' is not finite")]
    NotFinite(String),
}

/// Strip the trailing unit character and parse the remainder.
///
/// The model always appends exactly one unit character (`%`), whatever it is.
pub fn parse_yield_text(raw: &str) -> Result<f64, YieldParseError> {
    let mut chars = raw.chars();
    if chars.next_back().is_none() {
        return Err(YieldParseError::Empty);
    }
    let number = chars.as_str().trim();
    if number.is_empty() {
        return Err(YieldParseError::Empty);
    }
    let value: f64 = number
        .parse()
        .map_err(|_| YieldParseError::NotANumber(raw.to_string()))?;
    if !value.is_finite() {
        return Err(YieldParseError::NotFinite(raw.to_string()));
    }
    Ok(value)
}
