//! API Regression Tests
//!
//! In-process tests that build the Axum app via `create_app()` and exercise
//! the form page, `/health` and all /api/v1/* endpoints using
//! `tower::ServiceExt::oneshot()`. The model is replaced by a scripted
//! predictor, so no network port is needed.

use methanol_yield::api::{create_app, ApiState};
use methanol_yield::config::AppConfig;
use methanol_yield::{ReactionConditions, ServiceError, SubmissionService, YieldPredictor};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

/// What the scripted model answers with.
#[derive(Clone, Copy)]
enum Script {
    Yield(f64),
    Rejects,
    TimesOut,
    Status(u16),
}

struct ScriptedPredictor {
    script: Script,
    calls: AtomicUsize,
}

#[async_trait]
impl YieldPredictor for ScriptedPredictor {
    async fn predict(&self, _: &ReactionConditions) -> Result<f64, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script {
            Script::Yield(y) => Ok(y),
            Script::Rejects => Err(ServiceError::MissingFields),
            Script::TimesOut => Err(ServiceError::Timeout),
            Script::Status(code) => Err(ServiceError::Status(code)),
        }
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

fn create_test_app(script: Script) -> (axum::Router, Arc<ScriptedPredictor>) {
    let predictor = Arc::new(ScriptedPredictor {
        script,
        calls: AtomicUsize::new(0),
    });
    let service = SubmissionService::new(predictor.clone(), Arc::new(AppConfig::default()));
    (create_app(ApiState::new(service)), predictor)
}

fn predict_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

const NOMINAL: &str =
    r#"{"temperature":500,"pressure":80,"residence_time_1":15,"residence_time_2":8}"#;

/// 70% from the model: green headline and a good yield gauge.
#[tokio::test]
async fn test_nominal_prediction_is_high_yield() {
    let (app, predictor) = create_test_app(Script::Yield(70.0));

    let resp = app.oneshot(predict_request(NOMINAL)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );

    let json = json_body(resp).await;
    let data = &json["data"];
    assert_eq!(data["predicted_yield"], 70.0);
    assert_eq!(data["headline"]["tier"], "high");
    assert_eq!(data["headline"]["color"], "green");
    assert!(data["headline"]["message"]
        .as_str()
        .unwrap()
        .starts_with("High Yield: 70.00%"));
    assert!(data.get("advisory").is_none(), "in-range inputs carry no advisory");

    let gauges = data["gauges"].as_array().unwrap();
    assert_eq!(gauges.len(), 5);
    assert_eq!(gauges[0]["metric"], "yield");
    assert_eq!(gauges[0]["band"], "good");
    assert_eq!(json["meta"]["version"], "1");
    assert_eq!(predictor.calls.load(Ordering::SeqCst), 1);
}

/// Out-of-range inputs still get a prediction, with the advisory attached.
#[tokio::test]
async fn test_out_of_range_inputs_carry_advisory() {
    let (app, predictor) = create_test_app(Script::Yield(42.5));

    let body = r#"{"temperature":600,"pressure":80,"residence_time_1":15,"residence_time_2":8}"#;
    let resp = app.oneshot(predict_request(body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = json_body(resp).await;
    let data = &json["data"];
    assert_eq!(data["headline"]["tier"], "low");
    assert_eq!(data["advisory"]["out_of_range"][0], "temperature");
    assert!(data["advisory"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Inputs outside standard PFR ranges"));
    assert_eq!(predictor.calls.load(Ordering::SeqCst), 1);
}

/// A zero field is rejected before the model is called.
#[tokio::test]
async fn test_zero_field_blocks_model_call() {
    let (app, predictor) = create_test_app(Script::Yield(70.0));

    let body = r#"{"temperature":500,"pressure":0,"residence_time_1":15,"residence_time_2":8}"#;
    let resp = app.oneshot(predict_request(body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = json_body(resp).await;
    assert_eq!(json["error"]["code"], "INPUT_ERROR");
    assert_eq!(
        json["error"]["message"],
        "All fields must be non-zero. Please fill in every input."
    );
    assert_eq!(json["error"]["fields"][0], "pressure");
    assert_eq!(predictor.calls.load(Ordering::SeqCst), 0);
}

/// An empty field behaves like a zero one.
#[tokio::test]
async fn test_missing_field_blocks_model_call() {
    let (app, predictor) = create_test_app(Script::Yield(70.0));

    let body = r#"{"temperature":500,"pressure":80,"residence_time_1":15}"#;
    let resp = app.oneshot(predict_request(body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = json_body(resp).await;
    assert_eq!(json["error"]["fields"][0], "residence_time_2");
    assert_eq!(predictor.calls.load(Ordering::SeqCst), 0);
}

/// Non-JSON bodies are input errors too.
#[tokio::test]
async fn test_malformed_body_is_input_error() {
    let (app, predictor) = create_test_app(Script::Yield(70.0));

    let resp = app.oneshot(predict_request("temperature=500")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = json_body(resp).await;
    assert_eq!(json["error"]["code"], "INPUT_ERROR");
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid form submission: "));
    assert_eq!(predictor.calls.load(Ordering::SeqCst), 0);
}

/// A wrong-typed field is a malformed submission, not a zero field.
#[tokio::test]
async fn test_wrong_field_type_is_not_reported_as_zero() {
    let (app, predictor) = create_test_app(Script::Yield(70.0));

    let body = r#"{"temperature":"hot","pressure":80,"residence_time_1":15,"residence_time_2":8}"#;
    let resp = app.oneshot(predict_request(body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = json_body(resp).await;
    let message = json["error"]["message"].as_str().unwrap();
    assert_eq!(json["error"]["code"], "INPUT_ERROR");
    assert!(message.starts_with("Invalid form submission: "), "got {message}");
    assert!(!message.contains("non-zero"), "got {message}");
    assert_eq!(predictor.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_content_type_is_malformed_submission() {
    let (app, predictor) = create_test_app(Script::Yield(70.0));

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/predict")
        .body(Body::from(NOMINAL))
        .unwrap();
    let resp = app.oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = json_body(resp).await;
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid form submission: "));
    assert_eq!(predictor.calls.load(Ordering::SeqCst), 0);
}

/// Model 400 surfaces as the "all fields required" message.
#[tokio::test]
async fn test_model_rejection_is_unprocessable() {
    let (app, _) = create_test_app(Script::Rejects);

    let resp = app.oneshot(predict_request(NOMINAL)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = json_body(resp).await;
    assert_eq!(json["error"]["code"], "SERVICE_VALIDATION");
    assert_eq!(
        json["error"]["message"],
        "All fields are required. Kindly fill in every input."
    );
}

/// Timeout surfaces the cold-start message, once, with no retry.
#[tokio::test]
async fn test_timeout_is_gateway_timeout() {
    let (app, predictor) = create_test_app(Script::TimesOut);

    let resp = app.oneshot(predict_request(NOMINAL)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);

    let json = json_body(resp).await;
    assert_eq!(json["error"]["code"], "SERVICE_TIMEOUT");
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("likely waking up"));
    assert_eq!(predictor.calls.load(Ordering::SeqCst), 1);
}

/// Any other model status is a bad gateway naming the status code.
#[tokio::test]
async fn test_model_status_is_bad_gateway() {
    let (app, _) = create_test_app(Script::Status(503));

    let resp = app.oneshot(predict_request(NOMINAL)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let json = json_body(resp).await;
    assert_eq!(json["error"]["code"], "SERVICE_FAILURE");
    assert!(json["error"]["message"].as_str().unwrap().contains("503"));
}

/// Config endpoint exposes ranges, gauges and tiers.
#[tokio::test]
async fn test_config_endpoint() {
    let (app, _) = create_test_app(Script::Yield(70.0));

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/config")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = json_body(resp).await;
    let data = &json["data"];
    assert_eq!(data["standard_ranges"]["temperature"]["min"], 473.0);
    assert_eq!(data["gauges"]["yield"]["good"], 65.0);
    assert_eq!(data["yield_tiers"]["manageable"], 50.0);
    assert_eq!(data["max_achievable_yield"], 75.0);
}

#[tokio::test]
async fn test_health_returns_ok() {
    let (app, _) = create_test_app(Script::Yield(70.0));

    let resp = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = json_body(resp).await;
    assert_eq!(json["status"], "ok");
}

/// Unknown API paths get the JSON 404, not the form page.
#[tokio::test]
async fn test_unknown_api_path_is_404() {
    let (app, _) = create_test_app(Script::Yield(70.0));

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json = json_body(resp).await;
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

/// Root serves the embedded form page.
#[tokio::test]
async fn test_form_page_is_served() {
    let (app, _) = create_test_app(Script::Yield(70.0));

    let resp = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/html"));

    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let html = String::from_utf8_lossy(&bytes);
    assert!(html.contains("input-form"));
}

#[tokio::test]
async fn test_static_script_has_js_mime() {
    let (app, _) = create_test_app(Script::Yield(70.0));

    let resp = app
        .oneshot(Request::builder().uri("/app.js").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().contains("javascript"));
}
