use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use medley_core::models::ReconciledFile;
use medley_core::AppError;
use serde::Serialize;

use crate::error::HttpAppError;
use crate::services::query::{self, FileFilter};
use crate::services::reconcile;
use crate::state::{MetadataState, StorageState};

#[derive(Debug, Serialize)]
pub struct ListFilesResponse {
    pub success: bool,
    pub files: Vec<ReconciledFile>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

/// List files handler
///
/// Reconciles the full bucket listing with the metadata collection, then
/// applies the client's filter, search, sort, and pagination. `total` counts
/// matches before pagination so clients can page through the filtered set.
#[tracing::instrument(skip(storage, metadata, filter), fields(operation = "list_files"))]
pub async fn list_files(
    State(storage): State<StorageState>,
    State(metadata): State<MetadataState>,
    Query(filter): Query<FileFilter>,
) -> Result<impl IntoResponse, HttpAppError> {
    let files = reconcile::reconcile_files(storage.storage.as_ref(), metadata.store.as_ref())
        .await
        .map_err(|error| AppError::InternalWithSource {
            message: "Failed to fetch files".to_string(),
            source: anyhow::Error::new(error),
        })?;

    let (files, total) = query::apply(files, &filter);

    Ok(Json(ListFilesResponse {
        success: true,
        files,
        total,
        limit: filter.limit,
        offset: filter.offset,
    }))
}
