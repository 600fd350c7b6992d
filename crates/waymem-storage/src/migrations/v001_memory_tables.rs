//! v001: memory_sets, waypoints.

use rusqlite::Connection;

use waymem_core::errors::{StorageError, WaymemResult};

pub fn migrate(conn: &Connection) -> WaymemResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS memory_sets (
            map_id       TEXT PRIMARY KEY,
            last_updated TEXT NOT NULL,
            total_nodes  INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS waypoints (
            map_id            TEXT NOT NULL,
            ordinal           INTEGER NOT NULL,
            x                 REAL NOT NULL,
            y                 REAL NOT NULL,
            z                 REAL NOT NULL,
            traffic_score     REAL NOT NULL,
            hazard_score      REAL NOT NULL,
            observation_count INTEGER NOT NULL DEFAULT 1,
            last_updated      TEXT NOT NULL,
            PRIMARY KEY (map_id, ordinal),
            FOREIGN KEY (map_id) REFERENCES memory_sets(map_id) ON DELETE CASCADE
        );
        ",
    )
    .map_err(|e| {
        StorageError::MigrationFailed {
            version: 1,
            reason: e.to_string(),
        }
        .into()
    })
}
