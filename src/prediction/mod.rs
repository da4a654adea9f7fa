//! Remote yield model access.
//!
//! The model is an opaque external service. Everything upstream of it talks to
//! [`YieldPredictor`], so validation and classification run in tests without a
//! network, and the HTTP implementation lives in [`client`].

pub mod client;

pub use client::HttpPredictionClient;

use async_trait::async_trait;

use crate::types::{ReactionConditions, YieldParseError};

/// Operator-facing text for a 400 from the model.
pub const MISSING_FIELDS_MESSAGE: &str = "All fields are required. Kindly fill in every input.";

/// Operator-facing text for a call that outran the timeout.
pub const COLD_START_MESSAGE: &str =
    "The server took too long to respond — likely waking up. Please try again in a few seconds.";

/// Failure of a single prediction call.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The model rejected the payload (HTTP 400).
    #[error("All fields are required. Kindly fill in every input.")]
    MissingFields,
    /// Any other non-200 status.
    #[error("Prediction failed. Server returned status code {0}.")]
    Status(u16),
    /// The call exceeded the configured timeout. Not retried.
    #[error("The server took too long to respond — likely waking up. Please try again in a few seconds.")]
    Timeout,
    /// 200 with a body that does not carry a readable yield.
    #[error("Prediction failed. The server returned an unreadable response: {0}")]
    MalformedResponse(String),
    /// DNS, connect, TLS or other transport failure.
    #[error("Prediction failed. Could not reach the prediction server: {0}")]
    Transport(String),
}

impl ServiceError {
    /// Stable code for API payloads and logs.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingFields => "SERVICE_VALIDATION",
            Self::Status(_) | Self::MalformedResponse(_) | Self::Transport(_) => "SERVICE_FAILURE",
            Self::Timeout => "SERVICE_TIMEOUT",
        }
    }

    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

impl From<YieldParseError> for ServiceError {
    fn from(e: YieldParseError) -> Self {
        Self::MalformedResponse(e.to_string())
    }
}

/// The remote model: one operation, one call per invocation.
#[async_trait]
pub trait YieldPredictor: Send + Sync {
    /// Predicted methanol yield in percent.
    async fn predict(&self, conditions: &ReactionConditions) -> Result<f64, ServiceError>;

    /// Human-readable target for logging (e.g. the endpoint URL).
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_operator_text() {
        assert_eq!(ServiceError::MissingFields.to_string(), MISSING_FIELDS_MESSAGE);
        assert_eq!(ServiceError::Timeout.to_string(), COLD_START_MESSAGE);
        assert_eq!(
            ServiceError::Status(503).to_string(),
            "Prediction failed. Server returned status code 503."
        );
    }

    #[test]
    fn test_codes() {
        assert_eq!(ServiceError::MissingFields.code(), "SERVICE_VALIDATION");
        assert_eq!(ServiceError::Timeout.code(), "SERVICE_TIMEOUT");
        assert_eq!(ServiceError::Status(500).code(), "SERVICE_FAILURE");
        assert_eq!(
            ServiceError::MalformedResponse("x".into()).code(),
            "SERVICE_FAILURE"
        );
    }

    #[test]
    fn test_parse_error_becomes_malformed() {
        let err: ServiceError = YieldParseError::Empty.into();
        assert!(matches!(err, ServiceError::MalformedResponse(_)));
    }
}
