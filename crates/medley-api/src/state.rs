//! Application state shared across handlers.
//!
//! AppState is split into domain sub-states so handlers can extract only
//! what they need via Axum's `FromRef`: a handler that proxies search
//! queries has no business holding the storage client.

use std::sync::Arc;

use medley_core::Config;
use medley_db::MetadataStore;
use medley_storage::Storage;

// ----- Sub-states -----

/// Object storage access for upload, download and listing handlers.
#[derive(Clone)]
pub struct StorageState {
    pub storage: Arc<dyn Storage>,
}

/// Metadata document access for reconciliation and metadata lookups.
#[derive(Clone)]
pub struct MetadataState {
    pub store: Arc<dyn MetadataStore>,
}

/// Outbound HTTP client and target for the search proxy.
#[derive(Clone)]
pub struct SearchState {
    pub client: reqwest::Client,
    pub function_url: String,
}

// ----- AppState -----

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub storage: StorageState,
    pub metadata: MetadataState,
    pub search: SearchState,
    pub config: Config,
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for StorageState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.storage.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for MetadataState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.metadata.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for SearchState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.search.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
