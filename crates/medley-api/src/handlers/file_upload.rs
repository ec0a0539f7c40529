use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use medley_core::constants::{LIST_SIGNED_URL_TTL, MAX_UPLOAD_SIZE_BYTES};
use medley_core::models::{FileKind, FileStatus, UploadedFile};
use medley_core::AppError;
use medley_storage::StorageError;
use serde::Serialize;

use crate::error::HttpAppError;
use crate::state::StorageState;
use crate::utils::upload::{
    extract_multipart_file, sanitize_file_name, timestamped_key, validate_file_extension,
    validate_file_size,
};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub file: UploadedFile,
}

fn upload_failed(error: StorageError) -> AppError {
    AppError::InternalWithSource {
        message: "Upload failed".to_string(),
        source: anyhow::Error::new(error),
    }
}

/// Upload file handler
///
/// Accepts a multipart form with a single `file` field, validates size and
/// extension, and stores the bytes under a fresh timestamped key. Metadata
/// analysis happens later in an external pipeline; the response reports the
/// file as freshly uploaded.
#[tracing::instrument(skip(storage, multipart), fields(operation = "upload_file"))]
pub async fn upload_file(
    State(storage): State<StorageState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let (data, original_name, content_type) = extract_multipart_file(multipart).await?;

    validate_file_size(data.len(), MAX_UPLOAD_SIZE_BYTES)?;
    let file_type = validate_file_extension(&original_name)?;

    let key = timestamped_key(&sanitize_file_name(&original_name));
    let size = data.len() as u64;

    let store = storage.storage.as_ref();
    store
        .save(&key, data, &content_type, Some(&original_name))
        .await
        .map_err(upload_failed)?;

    let download_url = store
        .signed_url(&key, LIST_SIGNED_URL_TTL)
        .await
        .map_err(upload_failed)?;
    let preview_url = (file_type == FileKind::Image).then(|| download_url.clone());

    tracing::info!(key = %key, size_bytes = size, "File uploaded");

    Ok(Json(UploadResponse {
        success: true,
        file: UploadedFile {
            id: key.clone(),
            name: original_name,
            file_name: key.clone(),
            size,
            content_type,
            file_type,
            status: FileStatus::Uploaded,
            created_at: Utc::now(),
            download_url,
            preview_url,
            public_url: store.public_url(&key),
        },
    }))
}
