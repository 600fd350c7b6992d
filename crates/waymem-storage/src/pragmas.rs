//! PRAGMA configuration applied to every SQLite connection.
//!
//! File-backed databases run in WAL mode with NORMAL sync. Foreign keys are
//! always on; waypoint rows cascade from their memory set.

use rusqlite::Connection;

use waymem_core::errors::WaymemResult;

use crate::to_storage_err;

pub fn apply_pragmas(conn: &Connection) -> WaymemResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// In-memory databases cannot use WAL.
pub fn apply_memory_pragmas(conn: &Connection) -> WaymemResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn verify_wal_mode(conn: &Connection) -> WaymemResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
