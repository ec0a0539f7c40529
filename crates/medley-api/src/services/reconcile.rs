//! Reconciliation of stored objects with their metadata documents.
//!
//! The object store is the source of truth for which files exist; metadata
//! documents are written later by the analysis pipeline and may be missing,
//! stale, or orphaned. Listings therefore start from the bucket and join
//! metadata onto it, never the other way around.
//!
//! Keeps handler logic thin and allows unit testing without HTTP.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use medley_core::constants::{
    AUDIO_THUMBNAIL_PATH, DETAIL_SIGNED_URL_TTL, LIST_SIGNED_URL_TTL, PLACEHOLDER_THUMBNAIL_PATH,
    VIDEO_THUMBNAIL_PATH,
};
use medley_core::models::{
    AiAnalysis, FileDetails, FileKind, FileStatus, MetadataRecord, ReconciledFile,
};
use medley_core::AppError;
use medley_db::MetadataStore;
use medley_storage::{Storage, StorageError};

fn storage_err(err: StorageError) -> AppError {
    match err {
        StorageError::NotFound(key) => AppError::NotFound(format!("File not found: {}", key)),
        other => AppError::Storage(other.to_string()),
    }
}

/// Index metadata documents by the storage key they annotate. Documents
/// without a file name cannot be joined and are skipped; duplicate keys keep
/// the most recently inserted document.
fn index_by_file_name(records: Vec<MetadataRecord>) -> HashMap<String, MetadataRecord> {
    let mut by_file_name = HashMap::new();
    for record in records {
        if let Some(file_name) = record.file_name.clone() {
            by_file_name.insert(file_name, record);
        }
    }
    by_file_name
}

/// List every stored file joined with its metadata document.
///
/// A listing or metadata fetch failure fails the whole call. A failure to
/// enrich one file (a concurrent delete, a backend hiccup on one key) drops
/// that file from the listing and logs it rather than failing everything.
pub async fn reconcile_files(
    storage: &dyn Storage,
    store: &dyn MetadataStore,
) -> Result<Vec<ReconciledFile>, AppError> {
    let keys = storage.list().await.map_err(storage_err)?;
    let records = store.get_all().await?;
    let by_file_name = index_by_file_name(records);

    let now = Utc::now();
    let tasks = keys.into_iter().map(|key| {
        let record = by_file_name.get(&key).cloned();
        async move {
            match derive_file(storage, &key, record, now).await {
                Ok(file) => Some(file),
                Err(error) => {
                    tracing::warn!(
                        error = %error,
                        key = %key,
                        "Skipping file that failed to enrich"
                    );
                    None
                }
            }
        }
    });

    Ok(join_all(tasks).await.into_iter().flatten().collect())
}

/// Build the listing view of one stored object.
async fn derive_file(
    storage: &dyn Storage,
    key: &str,
    record: Option<MetadataRecord>,
    now: DateTime<Utc>,
) -> Result<ReconciledFile, AppError> {
    let object = storage.head(key).await.map_err(storage_err)?;

    let content_type = object.content_type.clone().unwrap_or_default();
    let file_type = FileKind::from_content_type(&content_type);
    let has_metadata = record.is_some();
    let status = FileStatus::classify(has_metadata, object.created_at, now);

    let download_url = storage
        .signed_url(key, LIST_SIGNED_URL_TTL)
        .await
        .map_err(storage_err)?;
    let preview_url = match file_type {
        FileKind::Image => download_url.clone(),
        FileKind::Video => VIDEO_THUMBNAIL_PATH.to_string(),
        FileKind::Audio => AUDIO_THUMBNAIL_PATH.to_string(),
        FileKind::Unknown => PLACEHOLDER_THUMBNAIL_PATH.to_string(),
    };

    Ok(ReconciledFile {
        id: key.to_string(),
        name: object.original_name.clone().unwrap_or_else(|| key.to_string()),
        file_name: key.to_string(),
        file_type,
        size: object.size,
        content_type,
        status,
        created_at: object.created_at,
        download_url,
        preview_url,
        public_url: storage.public_url(key),
        has_metadata,
        ai_analysis: record.as_ref().map(AiAnalysis::from_record),
    })
}

/// Build the detail view of one stored object. Does not consult metadata;
/// the detail endpoint reports what the object store knows.
pub async fn file_details(storage: &dyn Storage, key: &str) -> Result<FileDetails, AppError> {
    let object = storage.head(key).await.map_err(storage_err)?;

    let content_type = object.content_type.clone().unwrap_or_default();
    let file_type = FileKind::from_content_type(&content_type);

    let download_url = storage
        .signed_url(key, DETAIL_SIGNED_URL_TTL)
        .await
        .map_err(storage_err)?;
    let preview_url = (file_type == FileKind::Image).then(|| download_url.clone());

    Ok(FileDetails {
        id: key.to_string(),
        name: object.original_name.clone().unwrap_or_else(|| key.to_string()),
        file_name: key.to_string(),
        file_type,
        size: object.size,
        content_type,
        created_at: object.created_at,
        download_url,
        preview_url,
        public_url: storage.public_url(key),
    })
}

/// Delete a file's object and its metadata document.
/// Best-effort on both halves: logs errors but does not fail the overall delete.
pub async fn delete_file(storage: &dyn Storage, store: &dyn MetadataStore, key: &str) {
    if let Err(error) = storage.delete(key).await {
        tracing::warn!(error = %error, key = %key, "Object delete failed, continuing");
    }

    if let Err(error) = store.delete_by_file_name(key).await {
        tracing::warn!(error = %error, key = %key, "Metadata delete failed, continuing");
    }
}
