//! Consistent response envelope for all API endpoints.
//!
//! Every response is wrapped in either [`ApiResponse`] (success) or
//! [`ApiErrorResponse`] (error), ensuring a uniform JSON shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Serialize;

use crate::types::Metric;

/// Metadata included in every response.
#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub timestamp: String,
    pub version: &'static str,
}

impl Default for ResponseMeta {
    fn default() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            version: "1",
        }
    }
}

/// Successful response: `{ "data": T, "meta": { ... } }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Response {
        let body = Self {
            data,
            meta: ResponseMeta::default(),
        };
        (StatusCode::OK, axum::Json(body)).into_response()
    }
}

/// Error detail inside [`ApiErrorResponse`].
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    /// Input fields the error refers to.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Metric>,
    /// Out-of-range advisory that applied to the failed submission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}

/// Error response: `{ "error": { "code": "...", "message": "..." }, "meta": { ... } }`
#[derive(Debug)]
pub struct ApiErrorResponse {
    status: StatusCode,
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a ErrorDetail,
    meta: ResponseMeta,
}

impl ApiErrorResponse {
    pub fn new(status: StatusCode, code: &str, msg: impl Into<String>) -> Self {
        Self {
            status,
            error: ErrorDetail {
                code: code.to_string(),
                message: msg.into(),
                fields: Vec::new(),
                advisory: None,
            },
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: &[Metric]) -> Self {
        self.error.fields = fields.to_vec();
        self
    }

    #[must_use]
    pub fn with_advisory(mut self, advisory: Option<String>) -> Self {
        self.error.advisory = advisory;
        self
    }

    pub fn not_found(msg: impl Into<String>) -> Response {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", msg).into_response()
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: &self.error,
            meta: ResponseMeta::default(),
        };
        (self.status, axum::Json(body)).into_response()
    }
}
