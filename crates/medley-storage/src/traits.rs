use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::Stream;
use medley_core::StorageBackend;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Per-object facts a backend can report without reading the object body.
///
/// `created_at` is the backend's creation timestamp and drives status
/// classification. `content_type`, `original_name`, and `uploaded_at` come
/// from the sidecar written at save time and are absent for objects created
/// outside Medley.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub size: u64,
    pub content_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub original_name: Option<String>,
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// Storage abstraction over object store backends
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store an object under `key`, recording its content type and the
    /// client-supplied file name alongside it.
    async fn save(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
        original_name: Option<&str>,
    ) -> StorageResult<()>;

    /// Fetch per-object facts without downloading the body
    async fn head(&self, key: &str) -> StorageResult<StoredObject>;

    /// List every object key in the bucket, in the backend's listing order
    async fn list(&self) -> StorageResult<Vec<String>>;

    /// Download an object fully into memory
    async fn download(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Download an object as a byte stream
    async fn download_stream(
        &self,
        key: &str,
    ) -> StorageResult<Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>>;

    /// Delete an object. Deleting a missing object is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Produce a URL that grants read access to the object for `expires_in`
    async fn signed_url(&self, key: &str, expires_in: Duration) -> StorageResult<String>;

    /// Check whether an object exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Public (unsigned) URL for the object
    fn public_url(&self, key: &str) -> String;

    /// Get the backend type
    fn backend_type(&self) -> StorageBackend;
}
