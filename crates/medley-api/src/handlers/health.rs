use axum::{response::IntoResponse, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness probe. Does not touch storage or the metadata store.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}
