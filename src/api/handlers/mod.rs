//! API route handlers
//!
//! - Prediction submission (validate, call the model, classify)
//! - Health and active configuration for the form page

mod predict;
mod status;

pub use predict::*;
pub use status::*;

use std::time::Instant;

use crate::submission::SubmissionService;

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers. Read-only after startup.
#[derive(Clone)]
pub struct ApiState {
    /// Runs one submission per request
    pub submissions: SubmissionService,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl ApiState {
    pub fn new(submissions: SubmissionService) -> Self {
        Self {
            submissions,
            started_at: Instant::now(),
        }
    }
}
