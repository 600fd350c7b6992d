use serde::{Deserialize, Serialize};

use super::defaults;

/// Which persistence backend holds the memory sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Json,
}

/// Persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// SQLite database file (sqlite backend).
    pub db_path: String,
    /// Directory of `<map>.json` files (json backend).
    pub memory_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            db_path: defaults::DEFAULT_DB_PATH.to_string(),
            memory_dir: defaults::DEFAULT_MEMORY_DIR.to_string(),
        }
    }
}
