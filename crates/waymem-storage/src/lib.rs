//! # waymem-storage
//!
//! [`IMemoryStore`] backends. `SqliteStore` is the default; `JsonStore`
//! reads and writes the per-map JSON files older tooling produced.

pub mod json;
pub mod migrations;
pub mod pragmas;
pub mod sqlite;

use std::path::Path;

use tracing::info;

use waymem_core::config::{StorageBackend, StorageConfig};
use waymem_core::errors::{StorageError, WaymemError, WaymemResult};
use waymem_core::traits::IMemoryStore;

pub use json::JsonStore;
pub use sqlite::SqliteStore;

/// Wrap a backend error message as a storage error.
pub(crate) fn to_storage_err(message: String) -> WaymemError {
    WaymemError::StorageError(StorageError::SqliteError { message })
}

pub(crate) fn to_io_err(e: std::io::Error) -> WaymemError {
    WaymemError::StorageError(StorageError::IoError {
        message: e.to_string(),
    })
}

/// Map ids become file names and primary keys: non-empty, no path
/// separators, no `..`.
pub fn validate_map_id(map_id: &str) -> WaymemResult<()> {
    let invalid = map_id.trim().is_empty()
        || map_id.contains(['/', '\\'])
        || map_id.contains("..")
        || map_id.contains('\0');
    if invalid {
        return Err(StorageError::InvalidMapId {
            map_id: map_id.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Open the backend named by `config`.
pub fn open_store(config: &StorageConfig) -> WaymemResult<Box<dyn IMemoryStore>> {
    match config.backend {
        StorageBackend::Sqlite => {
            info!(path = %config.db_path, "opening sqlite memory store");
            Ok(Box::new(SqliteStore::open(Path::new(&config.db_path))?))
        }
        StorageBackend::Json => {
            info!(dir = %config.memory_dir, "opening json memory store");
            Ok(Box::new(JsonStore::new(&config.memory_dir)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_ids_are_validated() {
        assert!(validate_map_id("dm4").is_ok());
        assert!(validate_map_id("e1m1_remix").is_ok());
        for bad in ["", "  ", "../dm4", "maps/dm4", "dm4\\x", "a..b"] {
            let err = validate_map_id(bad).unwrap_err();
            assert!(
                matches!(err, WaymemError::StorageError(StorageError::InvalidMapId { .. })),
                "{bad:?} should be rejected"
            );
        }
    }
}
