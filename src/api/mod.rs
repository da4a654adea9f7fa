//! REST API module using Axum
//!
//! Provides the HTTP surface of the yield predictor:
//! - v1 JSON API (`/api/v1/predict`, `/api/v1/config`) with a consistent envelope
//! - `/health` liveness endpoint
//! - The reaction-conditions form page, served via `rust-embed` (compiled into the binary)

pub mod envelope;
pub mod handlers;
pub mod middleware;
mod routes;

pub use handlers::ApiState;

use axum::http::{header, Method, StatusCode, Uri};
use axum::middleware as axum_mw;
use axum::response::{IntoResponse, Response};
use axum::Router;
use rust_embed::Embed;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Form submissions are four numbers; anything larger is not a form.
const MAX_REQUEST_BODY_BYTES: usize = 16 * 1024;

/// Form page assets from `assets/`.
#[derive(Embed)]
#[folder = "assets/"]
struct FormAssets;

/// Serve a static asset or fall back to `index.html`.
async fn serve_asset(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    // Try exact file match first.
    if let Some(content) = FormAssets::get(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime.as_ref())],
            content.data.into_owned(),
        )
            .into_response();
    }

    if let Some(index) = FormAssets::get("index.html") {
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            index.data.into_owned(),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        "Methanol Yield Predictor is running. Form page assets are missing from this build.",
    )
        .into_response()
}

/// Build a CORS layer that is restrictive by default (same-origin only).
///
/// Set `PREDICTOR_CORS_ORIGINS` to a comma-separated list of allowed origins
/// when the form is hosted elsewhere.
fn build_cors_layer() -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match std::env::var("PREDICTOR_CORS_ORIGINS") {
        Ok(origins) => {
            let allowed: Vec<_> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            tracing::info!(origins = %origins, "CORS: allowing configured origins");
            base.allow_origin(allowed)
        }
        Err(_) => base,
    }
}

/// Create the complete application router with API and form page serving.
pub fn create_app(state: ApiState) -> Router {
    let cors = build_cors_layer();

    Router::new()
        .nest(
            "/api/v1",
            routes::api_routes(state.clone())
                .layer(axum_mw::from_fn(middleware::add_no_store_headers)),
        )
        .merge(routes::health_routes(state))
        // Form page for any unmatched path
        .fallback(serve_asset)
        // Middleware
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
