use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use medley_core::models::FileDetails;
use medley_core::AppError;
use serde::Serialize;

use crate::error::HttpAppError;
use crate::services::reconcile;
use crate::state::StorageState;

#[derive(Debug, Serialize)]
pub struct FileDetailsResponse {
    pub success: bool,
    pub file: FileDetails,
}

/// Get file details handler
///
/// Returns the storage view of a single file with a short-lived download
/// link. A missing key is a 404; anything else is an infrastructure failure.
#[tracing::instrument(skip(storage), fields(operation = "get_file", key = %id))]
pub async fn get_file(
    State(storage): State<StorageState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let file = reconcile::file_details(storage.storage.as_ref(), &id)
        .await
        .map_err(|error| match error {
            AppError::NotFound(_) => error,
            other => AppError::InternalWithSource {
                message: "Failed to fetch file".to_string(),
                source: anyhow::Error::new(other),
            },
        })?;

    Ok(Json(FileDetailsResponse {
        success: true,
        file,
    }))
}
