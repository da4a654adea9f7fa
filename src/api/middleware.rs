//! API middleware layers.
//!
//! Prediction results describe one submission only, so API responses are
//! marked uncacheable.

use axum::http::header::{CACHE_CONTROL, PRAGMA};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

/// Axum middleware that adds `Cache-Control: no-store` and `Pragma: no-cache`.
pub async fn add_no_store_headers(request: axum::extract::Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

    response
}
