//! One submission, start to finish.
//!
//! ```text
//! Idle → Validating → Rejected
//!                   → Calling → Succeeded | Failed | TimedOut
//! ```
//!
//! Idle is the absence of a submission, not a tracked phase: once a terminal
//! phase is reached the service holds nothing from that submission.

use std::sync::Arc;

use tracing::{info, warn};

use crate::classifier::PredictionReport;
use crate::config::AppConfig;
use crate::prediction::{ServiceError, YieldPredictor};
use crate::types::{ConditionsForm, ReactionConditions};
use crate::validator::{self, InputError, RangeAdvisory, ValidationOutcome};

/// Lifecycle phase of a submission, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Validating,
    Rejected,
    Calling,
    Succeeded,
    Failed,
    TimedOut,
}

impl std::fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validating => write!(f, "Validating"),
            Self::Rejected => write!(f, "Rejected"),
            Self::Calling => write!(f, "Calling"),
            Self::Succeeded => write!(f, "Succeeded"),
            Self::Failed => write!(f, "Failed"),
            Self::TimedOut => write!(f, "TimedOut"),
        }
    }
}

/// Terminal result of one submission.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Blocked before the model was called.
    Rejected(InputError),
    /// The model answered with a readable yield.
    Succeeded(PredictionReport),
    /// The model call failed. The range advisory, if any, still applies.
    Failed {
        error: ServiceError,
        advisory: Option<RangeAdvisory>,
    },
}

impl SubmissionOutcome {
    pub const fn phase(&self) -> SubmissionPhase {
        match self {
            Self::Rejected(_) => SubmissionPhase::Rejected,
            Self::Succeeded(_) => SubmissionPhase::Succeeded,
            Self::Failed { error, .. } if error.is_timeout() => SubmissionPhase::TimedOut,
            Self::Failed { .. } => SubmissionPhase::Failed,
        }
    }

    pub const fn report(&self) -> Option<&PredictionReport> {
        match self {
            Self::Succeeded(r) => Some(r),
            _ => None,
        }
    }

    pub const fn advisory(&self) -> Option<&RangeAdvisory> {
        match self {
            Self::Succeeded(r) => r.advisory.as_ref(),
            Self::Failed { advisory, .. } => advisory.as_ref(),
            Self::Rejected(_) => None,
        }
    }
}

/// Runs submissions against a predictor with a fixed configuration.
#[derive(Clone)]
pub struct SubmissionService {
    predictor: Arc<dyn YieldPredictor>,
    config: Arc<AppConfig>,
}

impl SubmissionService {
    pub fn new(predictor: Arc<dyn YieldPredictor>, config: Arc<AppConfig>) -> Self {
        Self { predictor, config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run a raw form submission. Empty fields reject like zero fields.
    pub async fn submit(&self, form: &ConditionsForm) -> SubmissionOutcome {
        match form.complete() {
            Ok(conditions) => self.submit_conditions(conditions).await,
            Err(missing) => {
                info!(phase = %SubmissionPhase::Rejected, ?missing, "Submission rejected: empty fields");
                SubmissionOutcome::Rejected(InputError::Missing(missing))
            }
        }
    }

    /// Validate, call the model once, classify.
    pub async fn submit_conditions(&self, conditions: ReactionConditions) -> SubmissionOutcome {
        info!(phase = %SubmissionPhase::Validating, ?conditions, "Submission received");

        let advisory = match validator::validate(&conditions, &self.config.standard_ranges) {
            ValidationOutcome::Rejected(err) => {
                info!(phase = %SubmissionPhase::Rejected, fields = ?err.fields(), "Submission rejected: {}", err);
                return SubmissionOutcome::Rejected(err);
            }
            ValidationOutcome::AcceptedWithWarning(advisory) => {
                info!(out_of_range = ?advisory.out_of_range, "Inputs outside standard ranges");
                Some(advisory)
            }
            ValidationOutcome::Accepted => None,
        };

        info!(phase = %SubmissionPhase::Calling, target = %self.predictor.describe(), "Requesting prediction");
        match self.predictor.predict(&conditions).await {
            Ok(predicted_yield) => {
                let report =
                    PredictionReport::build(conditions, predicted_yield, advisory, &self.config);
                info!(
                    phase = %SubmissionPhase::Succeeded,
                    yield_percent = predicted_yield,
                    tier = %report.headline.tier,
                    "Prediction complete"
                );
                SubmissionOutcome::Succeeded(report)
            }
            Err(error) => {
                let phase = if error.is_timeout() {
                    SubmissionPhase::TimedOut
                } else {
                    SubmissionPhase::Failed
                };
                warn!(phase = %phase, code = error.code(), "Prediction failed: {}", error);
                SubmissionOutcome::Failed { error, advisory }
            }
        }
    }
}
