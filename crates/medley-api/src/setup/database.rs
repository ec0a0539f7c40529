//! Metadata store setup and initialization

use anyhow::{Context, Result};
use medley_core::Config;
use medley_db::{create_metadata_store, MetadataStore};
use std::sync::Arc;

/// Setup the configured metadata document store. For the Postgres backend
/// this connects the pool and runs pending migrations.
pub async fn setup_metadata_store(config: &Config) -> Result<Arc<dyn MetadataStore>> {
    tracing::info!(backend = %config.metadata_backend, "Initializing metadata store...");
    let store = create_metadata_store(config)
        .await
        .context("Failed to initialize metadata store")?;
    tracing::info!("Metadata store initialized successfully");
    Ok(store)
}
