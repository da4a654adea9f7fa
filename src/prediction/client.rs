//! Prediction Client — HTTP client for the hosted yield model
//!
//! Sends one JSON POST per prediction. No retries: a timeout is reported to the
//! operator, who resubmits by hand once the model has woken up.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::{ServiceError, YieldPredictor};
use crate::config::PredictionServiceConfig;
use crate::types::{PredictionRequest, PredictionResponse, ReactionConditions};

/// HTTP client for the model's predict route
#[derive(Clone)]
pub struct HttpPredictionClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpPredictionClient {
    /// Create a client for `endpoint` with a per-call `timeout`.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint: endpoint.trim().to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &PredictionServiceConfig) -> Result<Self, reqwest::Error> {
        Self::new(&config.endpoint, config.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Timeouts get their own variant; everything else the transport can throw
/// collapses into a generic failure.
fn map_transport_error(e: reqwest::Error) -> ServiceError {
    if e.is_timeout() {
        ServiceError::Timeout
    } else {
        ServiceError::Transport(e.to_string())
    }
}

#[async_trait]
impl YieldPredictor for HttpPredictionClient {
    async fn predict(&self, conditions: &ReactionConditions) -> Result<f64, ServiceError> {
        let body = PredictionRequest::from(conditions);
        debug!(endpoint = %self.endpoint, ?body, "Sending prediction request");

        let resp = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        match resp.status() {
            StatusCode::OK => {
                let bytes = resp.bytes().await.map_err(map_transport_error)?;
                let parsed: PredictionResponse = serde_json::from_slice(&bytes)
                    .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;
                let value = parsed.yield_percent()?;
                debug!(yield_percent = value, raw = %parsed.predicted_yield, "Prediction received");
                Ok(value)
            }
            StatusCode::BAD_REQUEST => {
                warn!(endpoint = %self.endpoint, "Prediction service rejected the payload (400)");
                Err(ServiceError::MissingFields)
            }
            status => {
                warn!(endpoint = %self.endpoint, status = status.as_u16(), "Prediction service returned an error status");
                Err(ServiceError::Status(status.as_u16()))
            }
        }
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}
