//! Methanol Synthesis Yield Predictor
//!
//! Collects four plug-flow-reactor operating conditions, screens them, asks a
//! remote model for the predicted methanol yield, and classifies the answer
//! into a headline tier plus five gauges.
//!
//! ## Architecture
//!
//! - **Validator**: blocks zero/empty inputs, flags out-of-range ones
//! - **Prediction client**: one POST per submission, bounded by a timeout
//! - **Classifier**: yield tier, per-metric Low/Medium/Good bands
//! - **Submission service**: runs the steps above in order
//! - **API**: form page plus a JSON endpoint on top of the submission service

pub mod api;
pub mod classifier;
pub mod config;
pub mod prediction;
pub mod render;
pub mod submission;
pub mod types;
pub mod validator;

// Re-export configuration
pub use config::AppConfig;

// Re-export commonly used types
pub use types::{
    BandColor, ClassificationBand, ConditionsForm, Metric, PredictionRequest,
    PredictionResponse, ReactionConditions,
};

pub use classifier::{Gauge, PredictionReport, YieldTier};
pub use prediction::{HttpPredictionClient, ServiceError, YieldPredictor};
pub use submission::{SubmissionOutcome, SubmissionPhase, SubmissionService};
pub use validator::{InputError, RangeAdvisory, ValidationOutcome};
