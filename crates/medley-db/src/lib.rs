//! Medley DB Library
//!
//! Document store for the metadata written by the external analysis pipeline.
//! The store is keyed by storage file name; lookups fall back to the
//! document's original client file name for documents written before the
//! storage key was recorded.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use medley_core::config::MetadataBackend;
use medley_core::models::MetadataRecord;
use medley_core::{AppError, Config};
use std::sync::Arc;
use std::time::Duration;

pub use memory::MemoryMetadataStore;
pub use postgres::PgMetadataStore;

/// Access to the metadata document store
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Fetch every document, oldest first
    async fn get_all(&self) -> Result<Vec<MetadataRecord>, AppError>;

    /// Find the oldest document whose `fileName` matches the storage key
    async fn find_by_file_name(&self, file_name: &str) -> Result<Option<MetadataRecord>, AppError>;

    /// Find the oldest document whose `originalName` matches the given name
    async fn find_by_original_name(
        &self,
        original_name: &str,
    ) -> Result<Option<MetadataRecord>, AppError>;

    /// Total number of documents in the store
    async fn count(&self) -> Result<u64, AppError>;

    /// Store a document, assigning an id when the record has none
    async fn insert(&self, record: MetadataRecord) -> Result<MetadataRecord, AppError>;

    /// Delete the oldest document matching the storage key, if any
    async fn delete_by_file_name(&self, file_name: &str) -> Result<(), AppError>;
}

/// Create a metadata store based on configuration
pub async fn create_metadata_store(config: &Config) -> Result<Arc<dyn MetadataStore>, AppError> {
    match config.metadata_backend {
        MetadataBackend::Postgres => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                AppError::Internal("DATABASE_URL not configured".to_string())
            })?;
            let store = PgMetadataStore::connect(
                url,
                config.db_max_connections,
                Duration::from_secs(config.db_timeout_seconds),
            )
            .await?;
            tracing::info!("Using Postgres metadata store");
            Ok(Arc::new(store))
        }
        MetadataBackend::Memory => {
            tracing::warn!("Using in-memory metadata store, documents will not survive restarts");
            Ok(Arc::new(MemoryMetadataStore::new()))
        }
    }
}
