use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use medley_core::models::MetadataRecord;
use medley_core::AppError;
use serde::Serialize;

use crate::state::MetadataState;

#[derive(Debug, Serialize)]
pub struct MetadataResponse {
    pub success: bool,
    pub metadata: MetadataRecord,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDebug {
    pub searched_file_name: String,
    pub total_documents: u64,
}

/// "Not found" is an expected state while the analysis pipeline is still
/// running, so it is a 200 with `success:false` and enough debug context to
/// tell an empty collection from a key mismatch.
#[derive(Debug, Serialize)]
pub struct MetadataMissResponse {
    pub success: bool,
    pub error: String,
    pub metadata: Option<MetadataRecord>,
    pub debug: MetadataDebug,
}

#[derive(Debug, Serialize)]
pub struct MetadataErrorResponse {
    pub success: bool,
    pub error: String,
    pub details: String,
    pub metadata: Option<MetadataRecord>,
}

fn metadata_error(error: AppError) -> Response {
    tracing::error!(error = %error, "Failed to fetch metadata");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(MetadataErrorResponse {
            success: false,
            error: "Failed to fetch metadata".to_string(),
            details: error.to_string(),
            metadata: None,
        }),
    )
        .into_response()
}

/// Get metadata handler
///
/// Looks a metadata document up by storage key, then falls back to the
/// original (pre-sanitization) file name for documents written by pipeline
/// versions that keyed on it.
#[tracing::instrument(skip(metadata), fields(operation = "get_metadata", file_name = %file_name))]
pub async fn get_metadata(
    State(metadata): State<MetadataState>,
    Path(file_name): Path<String>,
) -> Response {
    let store = metadata.store.as_ref();

    let mut record = match store.find_by_file_name(&file_name).await {
        Ok(found) => found,
        Err(error) => return metadata_error(error),
    };
    if record.is_none() {
        record = match store.find_by_original_name(&file_name).await {
            Ok(found) => found,
            Err(error) => return metadata_error(error),
        };
    }

    match record {
        Some(record) => Json(MetadataResponse {
            success: true,
            metadata: record,
        })
        .into_response(),
        None => {
            let total_documents = match store.count().await {
                Ok(count) => count,
                Err(error) => return metadata_error(error),
            };
            tracing::debug!(total_documents, "No metadata document found");
            Json(MetadataMissResponse {
                success: false,
                error: "Metadata not found".to_string(),
                metadata: None,
                debug: MetadataDebug {
                    searched_file_name: file_name,
                    total_documents,
                },
            })
            .into_response()
        }
    }
}
