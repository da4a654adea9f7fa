//! Prediction Client Tests
//!
//! Runs `HttpPredictionClient` against small Axum stubs bound to
//! `127.0.0.1:0`, one per scenario.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use methanol_yield::{HttpPredictionClient, ReactionConditions, ServiceError, YieldPredictor};

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    calls: Arc<AtomicUsize>,
    last_body: Arc<tokio::sync::Mutex<Option<Value>>>,
}

async fn stub_predict(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    state.calls.fetch_add(1, Ordering::SeqCst);
    *state.last_body.lock().await = Some(body);
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (
        state.status,
        [(axum::http::header::CONTENT_TYPE, "application/json")],
        state.body,
    )
        .into_response()
}

/// Start a stub model; returns its predict URL and shared state.
async fn spawn_stub(status: StatusCode, body: &'static str, delay: Duration) -> (String, StubState) {
    let state = StubState {
        status,
        body,
        delay,
        calls: Arc::new(AtomicUsize::new(0)),
        last_body: Arc::new(tokio::sync::Mutex::new(None)),
    };
    let app = Router::new()
        .route("/predict", post(stub_predict))
        .with_state(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/predict"), state)
}

fn nominal() -> ReactionConditions {
    ReactionConditions::new(500.0, 80.0, 15.0, 8.0)
}

#[tokio::test]
async fn test_ok_response_parses_percentage_text() {
    let (url, stub) = spawn_stub(
        StatusCode::OK,
        r#"{"Predicted Percentage yield": "42.50%"}"#,
        Duration::ZERO,
    )
    .await;
    let client = HttpPredictionClient::new(&url, Duration::from_secs(5)).unwrap();

    let y = client.predict(&nominal()).await.unwrap();
    assert!((y - 42.5).abs() < 1e-9);
    assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_request_uses_model_field_names() {
    let (url, stub) = spawn_stub(
        StatusCode::OK,
        r#"{"Predicted Percentage yield": "70.00%"}"#,
        Duration::ZERO,
    )
    .await;
    let client = HttpPredictionClient::new(&url, Duration::from_secs(5)).unwrap();
    client.predict(&nominal()).await.unwrap();

    let body = stub.last_body.lock().await.clone().unwrap();
    assert_eq!(
        body,
        json!({
            "Temperature (K)": 500.0,
            "Pressure (bar)": 80.0,
            "Residence Time (s)_1": 15.0,
            "Residence Time (s)_2": 8.0,
        })
    );
}

#[tokio::test]
async fn test_bad_request_is_missing_fields() {
    let (url, _) = spawn_stub(StatusCode::BAD_REQUEST, r#"{"error":"missing"}"#, Duration::ZERO).await;
    let client = HttpPredictionClient::new(&url, Duration::from_secs(5)).unwrap();

    let err = client.predict(&nominal()).await.unwrap_err();
    assert!(matches!(err, ServiceError::MissingFields));
    assert_eq!(
        err.to_string(),
        "All fields are required. Kindly fill in every input."
    );
}

#[tokio::test]
async fn test_other_status_is_reported_with_code() {
    let (url, _) = spawn_stub(StatusCode::SERVICE_UNAVAILABLE, "{}", Duration::ZERO).await;
    let client = HttpPredictionClient::new(&url, Duration::from_secs(5)).unwrap();

    let err = client.predict(&nominal()).await.unwrap_err();
    assert!(matches!(err, ServiceError::Status(503)));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_missing_yield_key_is_malformed() {
    let (url, _) = spawn_stub(StatusCode::OK, r#"{"yield": 42}"#, Duration::ZERO).await;
    let client = HttpPredictionClient::new(&url, Duration::from_secs(5)).unwrap();

    let err = client.predict(&nominal()).await.unwrap_err();
    assert!(matches!(err, ServiceError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_unparseable_yield_text_is_malformed() {
    let (url, _) = spawn_stub(
        StatusCode::OK,
        r#"{"Predicted Percentage yield": "n/a%"}"#,
        Duration::ZERO,
    )
    .await;
    let client = HttpPredictionClient::new(&url, Duration::from_secs(5)).unwrap();

    let err = client.predict(&nominal()).await.unwrap_err();
    assert!(matches!(err, ServiceError::MalformedResponse(_)));
}

/// A slow model times out once and is not retried.
#[tokio::test]
async fn test_slow_model_times_out_without_retry() {
    let (url, stub) = spawn_stub(
        StatusCode::OK,
        r#"{"Predicted Percentage yield": "70.00%"}"#,
        Duration::from_secs(2),
    )
    .await;
    let client = HttpPredictionClient::new(&url, Duration::from_millis(200)).unwrap();

    let err = client.predict(&nominal()).await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err:?}");
    assert_eq!(err.code(), "SERVICE_TIMEOUT");
    assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        HttpPredictionClient::new(&format!("http://{addr}/predict"), Duration::from_secs(2))
            .unwrap();
    let err = client.predict(&nominal()).await.unwrap_err();
    assert!(matches!(err, ServiceError::Transport(_)), "got {err:?}");
}
