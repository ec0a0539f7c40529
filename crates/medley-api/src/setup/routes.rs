//! Route registration and middleware stack

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use medley_core::constants::MAX_UPLOAD_SIZE_BYTES;
use medley_core::Config;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    file_delete, file_download, file_get, file_upload, files_list, health, metadata_get, search,
};
use crate::state::AppState;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config);

    // Server-level concurrency limit to protect against resource exhaustion under extreme load
    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let app = file_routes(state)
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        // Headroom over the validation limit so an oversized upload reaches the
        // handler and gets the detailed 400 instead of a bare 413.
        .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_SIZE_BYTES + 1024 * 1024))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn file_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/files", get(files_list::list_files))
        .route(
            "/files/{id}",
            get(file_get::get_file).delete(file_delete::delete_file),
        )
        .route("/files/{id}/download", get(file_download::download_file))
        .route("/upload", post(file_upload::upload_file))
        .route("/metadata/{file_name}", get(metadata_get::get_metadata))
        .route("/search", get(search::search))
        .route("/health", get(health::health))
        .with_state(state)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> CorsLayer {
    if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    }
}
