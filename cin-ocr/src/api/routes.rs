use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::legacy;
use super::v1;
use super::AppState;

/// Room for multipart boundaries, headers and the `language` field on top of
/// the image itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

fn request_body_limit(max_bytes: usize) -> usize {
    max_bytes.saturating_add(MULTIPART_OVERHEAD)
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = request_body_limit(state.config.upload.max_bytes);

    Router::new()
        .nest("/api/v1", v1::router::v1_router())
        .merge(legacy::legacy_router())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
