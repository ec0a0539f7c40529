//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p medley-api --test upload_test` or
//! `cargo test -p medley-api`. Tests run against local storage in a temp
//! directory and the in-memory metadata store, so no external services are
//! required.

use std::sync::Arc;

use axum_test::TestServer;
use medley_api::setup::routes;
use medley_api::state::{AppState, MetadataState, SearchState, StorageState};
use medley_core::{Config, MetadataBackend, StorageBackend};
use medley_db::{MemoryMetadataStore, MetadataStore};
use medley_storage::{LocalStorage, Storage};
use tempfile::TempDir;

/// Test application: server and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<dyn Storage>,
    pub metadata: Arc<dyn MetadataStore>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

fn test_config() -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        storage_backend: StorageBackend::Local,
        s3_bucket: None,
        s3_region: None,
        aws_region: None,
        s3_endpoint: None,
        local_storage_path: None,
        local_storage_base_url: None,
        metadata_backend: MetadataBackend::Memory,
        database_url: None,
        db_max_connections: 5,
        db_timeout_seconds: 5,
        // Unroutable on purpose: the search proxy tests expect upstream failure.
        search_function_url: "http://127.0.0.1:9/searchFiles".to_string(),
    }
}

/// Setup test app with temp-dir local storage and in-memory metadata.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(
            temp_dir.path().to_path_buf(),
            "http://localhost:4000/media".to_string(),
        )
        .await
        .expect("Failed to create local storage"),
    );
    let metadata: Arc<dyn MetadataStore> = Arc::new(MemoryMetadataStore::new());

    let config = test_config();
    let state = Arc::new(AppState {
        storage: StorageState {
            storage: storage.clone(),
        },
        metadata: MetadataState {
            store: metadata.clone(),
        },
        search: SearchState {
            client: reqwest::Client::new(),
            function_url: config.search_function_url.clone(),
        },
        config,
    });

    let app = routes::setup_routes(&state.config, state.clone()).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        storage,
        metadata,
        _temp_dir: temp_dir,
    }
}
