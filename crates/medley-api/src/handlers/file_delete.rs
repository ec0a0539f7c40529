use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::services::reconcile;
use crate::state::{MetadataState, StorageState};

#[derive(Debug, Serialize)]
pub struct DeleteFileResponse {
    pub success: bool,
    pub message: String,
}

/// Delete file handler
///
/// Removes the stored object and its metadata document. Both halves are
/// best-effort, so deleting an identifier that no longer exists on either
/// side still reports success.
#[tracing::instrument(skip(storage, metadata), fields(operation = "delete_file", key = %id))]
pub async fn delete_file(
    State(storage): State<StorageState>,
    State(metadata): State<MetadataState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    reconcile::delete_file(storage.storage.as_ref(), metadata.store.as_ref(), &id).await;

    Json(DeleteFileResponse {
        success: true,
        message: "File deleted successfully".to_string(),
    })
}
