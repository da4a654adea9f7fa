//! Prediction submission endpoint

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::envelope::{ApiErrorResponse, ApiResponse};
use crate::prediction::ServiceError;
use crate::submission::SubmissionOutcome;
use crate::types::ConditionsForm;

use super::ApiState;

/// HTTP status reported to the browser for a failed model call.
const fn service_error_status(error: &ServiceError) -> StatusCode {
    match error {
        ServiceError::MissingFields => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ServiceError::Status(_) | ServiceError::MalformedResponse(_) | ServiceError::Transport(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

/// POST /api/v1/predict - Validate the form, call the model once, classify
///
/// Body: `{"temperature": 500, "pressure": 80, "residence_time_1": 15, "residence_time_2": 8}`.
/// Success returns the prediction report (headline, advisory, five gauges).
pub async fn predict(
    State(state): State<ApiState>,
    payload: Result<Json<ConditionsForm>, JsonRejection>,
) -> Response {
    let form = match payload {
        Ok(Json(form)) => form,
        Err(rejection) => {
            return ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                "INPUT_ERROR",
                format!("Invalid form submission: {}", rejection.body_text()),
            )
            .into_response();
        }
    };

    match state.submissions.submit(&form).await {
        SubmissionOutcome::Succeeded(report) => ApiResponse::ok(report),
        SubmissionOutcome::Rejected(err) => {
            ApiErrorResponse::new(StatusCode::BAD_REQUEST, "INPUT_ERROR", err.to_string())
                .with_fields(err.fields())
                .into_response()
        }
        SubmissionOutcome::Failed { error, advisory } => ApiErrorResponse::new(
            service_error_status(&error),
            error.code(),
            error.to_string(),
        )
        .with_advisory(advisory.map(|a| a.message))
        .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_status_mapping() {
        assert_eq!(
            service_error_status(&ServiceError::MissingFields),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            service_error_status(&ServiceError::Timeout),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            service_error_status(&ServiceError::Status(500)),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            service_error_status(&ServiceError::Transport("refused".into())),
            StatusCode::BAD_GATEWAY
        );
    }
}
