use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use futures::StreamExt;
use medley_core::AppError;
use medley_storage::StorageError;

use crate::error::HttpAppError;
use crate::state::StorageState;

fn download_failed(error: StorageError) -> AppError {
    AppError::InternalWithSource {
        message: "Failed to download file".to_string(),
        source: anyhow::Error::new(error),
    }
}

/// Download file handler
///
/// Proxies the object's bytes through the server as an attachment, restoring
/// the client's original file name when one was recorded at upload time.
#[tracing::instrument(skip(storage), fields(operation = "download_file", key = %id))]
pub async fn download_file(
    State(storage): State<StorageState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let store = storage.storage.as_ref();

    let object = store.head(&id).await.map_err(download_failed)?;
    let stream = store.download_stream(&id).await.map_err(download_failed)?;

    let file_name = object
        .original_name
        .clone()
        .unwrap_or_else(|| object.key.clone());
    let content_type = object
        .content_type
        .clone()
        .unwrap_or_else(|| "application/octet-stream".to_string());

    tracing::debug!(key = %id, size_bytes = object.size, "Proxying file from storage");

    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, object.size)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        )
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}
