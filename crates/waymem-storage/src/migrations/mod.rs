//! Schema migrations, tracked in `schema_version`.

mod v001_memory_tables;

use rusqlite::Connection;
use tracing::info;

use waymem_core::errors::{StorageError, WaymemResult};

type Migration = fn(&Connection) -> WaymemResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[(1, v001_memory_tables::migrate)];

pub const LATEST_VERSION: u32 = 1;

fn failed(version: u32, reason: impl ToString) -> StorageError {
    StorageError::MigrationFailed {
        version,
        reason: reason.to_string(),
    }
}

/// Highest applied version; 0 on a fresh database.
pub fn current_version(conn: &Connection) -> WaymemResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| failed(0, e))?;
    let version: u32 = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |row| {
            row.get(0)
        })
        .map_err(|e| failed(0, e))?;
    Ok(version)
}

/// Apply every migration newer than the recorded version, each in its own
/// transaction.
pub fn run_migrations(conn: &mut Connection) -> WaymemResult<()> {
    let current = current_version(conn)?;
    for &(version, migrate) in MIGRATIONS {
        if version <= current {
            continue;
        }
        let tx = conn.transaction().map_err(|e| failed(version, e))?;
        migrate(&tx)?;
        tx.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
            .map_err(|e| failed(version, e))?;
        tx.commit().map_err(|e| failed(version, e))?;
        info!(version, "applied migration");
    }
    Ok(())
}
