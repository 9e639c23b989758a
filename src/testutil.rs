//! Shared test helpers for in-process router tests.

use std::sync::Arc;

use crate::config::{Config, ServerConfig, StorageConfig};
use crate::storage::Database;
use crate::uploads::UploadDir;
use crate::AppState;

/// Create a test AppState with a temporary database and upload directory.
pub fn test_state(temp_dir: &tempfile::TempDir) -> Arc<AppState> {
    let data_dir = temp_dir.path().join("data");
    let upload_dir = temp_dir.path().join("uploads");

    let config = Config {
        server: ServerConfig {
            port: 0,
            max_upload_size: Some(10 * 1024 * 1024), // 10MB for tests
        },
        storage: StorageConfig {
            database_url: data_dir.to_string_lossy().to_string(),
            upload_dir: upload_dir.to_string_lossy().to_string(),
        },
    };

    let db = Database::open(&data_dir).expect("Failed to open test database");
    let uploads = UploadDir::new(&upload_dir).expect("Failed to create test upload directory");

    Arc::new(AppState {
        config,
        db,
        uploads,
    })
}
