//! Input validation for one submission.
//!
//! A zero (or missing) field blocks the request outright. A value outside the
//! standard PFR operating range does not: the request still goes out and the
//! operator gets a reliability advisory next to the result.

use serde::Serialize;

use crate::config::StandardRanges;
use crate::types::{Metric, ReactionConditions};

/// Message shown when a field is zero or left empty.
pub const NON_ZERO_MESSAGE: &str = "All fields must be non-zero. Please fill in every input.";

/// Message shown when a field is NaN or infinite.
pub const NON_FINITE_MESSAGE: &str = "All fields must be finite numbers.";

// ============================================================================
// Outcomes
// ============================================================================

/// Why a submission was blocked before reaching the model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("All fields must be non-zero. Please fill in every input.")]
    Missing(Vec<Metric>),
    #[error("All fields must be non-zero. Please fill in every input.")]
    Zero(Vec<Metric>),
    #[error("All fields must be finite numbers.")]
    NotFinite(Vec<Metric>),
}

impl InputError {
    /// The offending fields, in form order.
    pub fn fields(&self) -> &[Metric] {
        match self {
            Self::Missing(f) | Self::Zero(f) | Self::NotFinite(f) => f,
        }
    }
}

/// Non-blocking notice that at least one input lies outside its standard range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeAdvisory {
    pub out_of_range: Vec<Metric>,
    pub message: String,
}

impl RangeAdvisory {
    fn new(out_of_range: Vec<Metric>, ranges: &StandardRanges) -> Self {
        Self {
            out_of_range,
            message: range_advisory_message(ranges),
        }
    }
}

/// Result of validating one set of conditions.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// Blocking; no request is sent.
    Rejected(InputError),
    /// Request proceeds; advisory is shown.
    AcceptedWithWarning(RangeAdvisory),
    /// Request proceeds silently.
    Accepted,
}

impl ValidationOutcome {
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub const fn advisory(&self) -> Option<&RangeAdvisory> {
        match self {
            Self::AcceptedWithWarning(a) => Some(a),
            _ => None,
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Validate a complete set of conditions.
///
/// Checks run in order: zero, finiteness, standard range. A zero field is
/// rejected whether or not zero lies inside its range.
pub fn validate(conditions: &ReactionConditions, ranges: &StandardRanges) -> ValidationOutcome {
    let fields = conditions.fields();

    let zero: Vec<Metric> = fields
        .iter()
        .filter(|(_, v)| *v == 0.0)
        .map(|(m, _)| *m)
        .collect();
    if !zero.is_empty() {
        return ValidationOutcome::Rejected(InputError::Zero(zero));
    }

    let non_finite: Vec<Metric> = fields
        .iter()
        .filter(|(_, v)| !v.is_finite())
        .map(|(m, _)| *m)
        .collect();
    if !non_finite.is_empty() {
        return ValidationOutcome::Rejected(InputError::NotFinite(non_finite));
    }

    let out_of_range: Vec<Metric> = fields
        .iter()
        .filter(|(m, v)| ranges.get(*m).is_some_and(|r| !r.contains(*v)))
        .map(|(m, _)| *m)
        .collect();
    if out_of_range.is_empty() {
        ValidationOutcome::Accepted
    } else {
        ValidationOutcome::AcceptedWithWarning(RangeAdvisory::new(out_of_range, ranges))
    }
}

/// Advisory text quoting the configured standard ranges.
pub fn range_advisory_message(ranges: &StandardRanges) -> String {
    let t = &ranges.temperature;
    let p = &ranges.pressure;
    let r1 = &ranges.residence_time_1;
    let r2 = &ranges.residence_time_2;
    let times = if r1 == r2 {
        format!("Times {}–{} s", r1.min, r1.max)
    } else {
        format!("Time 1 {}–{} s, Time 2 {}–{} s", r1.min, r1.max, r2.min, r2.max)
    };
    format!(
        "Inputs outside standard PFR ranges (Temp {}–{} K, Pressure {}–{} bar, {times}). \
         Results may be less reliable.",
        t.min, t.max, p.min, p.max
    )
}
