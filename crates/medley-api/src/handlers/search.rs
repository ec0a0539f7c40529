use axum::{
    extract::{RawQuery, State},
    response::IntoResponse,
    Json,
};
use medley_core::AppError;

use crate::error::HttpAppError;
use crate::state::SearchState;

/// Search proxy handler
///
/// Forwards the raw query string to the external search function and relays
/// its JSON response untouched. Any failure, including a non-success status
/// from the function, collapses to a single opaque error so the upstream URL
/// and its error bodies never leak to clients.
#[tracing::instrument(skip(search, query), fields(operation = "search"))]
pub async fn search(
    State(search): State<SearchState>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, HttpAppError> {
    let url = match query.as_deref() {
        Some(params) if !params.is_empty() => format!("{}?{}", search.function_url, params),
        _ => search.function_url.clone(),
    };

    let payload: serde_json::Value = search
        .client
        .get(&url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|error| {
            tracing::error!(error = %error, "Search proxy request failed");
            AppError::Upstream("Search failed".to_string())
        })?
        .json()
        .await
        .map_err(|error| {
            tracing::error!(error = %error, "Search proxy returned invalid JSON");
            AppError::Upstream("Search failed".to_string())
        })?;

    Ok(Json(payload))
}
