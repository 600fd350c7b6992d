//! SQLite-backed [`IMemoryStore`].

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, warn};

use waymem_core::errors::{StorageError, WaymemResult};
use waymem_core::models::{timestamp, PersistedMemorySet, Position, WaypointRecord};
use waymem_core::traits::IMemoryStore;

use crate::migrations;
use crate::pragmas::{apply_memory_pragmas, apply_pragmas};
use crate::{to_storage_err, validate_map_id};

/// One connection behind a mutex. Writes are serialized; each `save` is a
/// single transaction.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (creating if needed) a database file and migrate it.
    pub fn open(path: &Path) -> WaymemResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(crate::to_io_err)?;
        }
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Self::initialize(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database (for testing).
    pub fn open_in_memory() -> WaymemResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_memory_pragmas(&conn)?;
        Self::initialize(conn, None)
    }

    fn initialize(mut conn: Connection, db_path: Option<PathBuf>) -> WaymemResult<Self> {
        migrations::run_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Lock the connection and run `f` with it.
    pub fn with_conn<F, T>(&self, f: F) -> WaymemResult<T>
    where
        F: FnOnce(&mut Connection) -> WaymemResult<T>,
    {
        let mut guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("connection lock poisoned: {e}")))?;
        f(&mut guard)
    }
}

fn parse_time(map_id: &str, raw: &str) -> WaymemResult<DateTime<Utc>> {
    timestamp::parse(raw).map_err(|details| {
        StorageError::CorruptRecord {
            map_id: map_id.to_string(),
            details,
        }
        .into()
    })
}

impl IMemoryStore for SqliteStore {
    fn load(&self, map_id: &str) -> WaymemResult<Option<PersistedMemorySet>> {
        validate_map_id(map_id)?;
        self.with_conn(|conn| {
            let header: Option<(String, i64)> = conn
                .query_row(
                    "SELECT last_updated, total_nodes FROM memory_sets WHERE map_id = ?1",
                    [map_id],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()
                .map_err(|e| to_storage_err(e.to_string()))?;
            let Some((last_updated, total_nodes)) = header else {
                return Ok(None);
            };

            let mut stmt = conn
                .prepare(
                    "SELECT x, y, z, traffic_score, hazard_score, observation_count, last_updated
                     FROM waypoints WHERE map_id = ?1 ORDER BY ordinal",
                )
                .map_err(|e| to_storage_err(e.to_string()))?;
            let rows = stmt
                .query_map([map_id], |row| {
                    Ok((
                        Position::new(row.get(0)?, row.get(1)?, row.get(2)?),
                        row.get::<_, f64>(3)?,
                        row.get::<_, f64>(4)?,
                        row.get::<_, i64>(5)?,
                        row.get::<_, String>(6)?,
                    ))
                })
                .map_err(|e| to_storage_err(e.to_string()))?;

            let mut nodes = Vec::new();
            for row in rows {
                let (position, traffic, hazard, count, updated) =
                    row.map_err(|e| to_storage_err(e.to_string()))?;
                let record = WaypointRecord::observed_at(
                    position,
                    traffic,
                    hazard,
                    parse_time(map_id, &updated)?,
                )
                .with_observation_count(u32::try_from(count).unwrap_or(u32::MAX));
                nodes.push(record);
            }

            if total_nodes as usize != nodes.len() {
                warn!(
                    map_id,
                    recorded = total_nodes,
                    found = nodes.len(),
                    "stored node count disagrees with rows"
                );
            }
            debug!(map_id, nodes = nodes.len(), "loaded memory set");

            Ok(Some(PersistedMemorySet {
                map: map_id.to_string(),
                last_updated: parse_time(map_id, &last_updated)?,
                total_nodes: nodes.len(),
                nodes,
            }))
        })
    }

    fn save(&self, map_id: &str, set: &PersistedMemorySet) -> WaymemResult<()> {
        validate_map_id(map_id)?;
        self.with_conn(|conn| {
            let tx = conn
                .transaction()
                .map_err(|e| to_storage_err(e.to_string()))?;

            tx.execute("DELETE FROM waypoints WHERE map_id = ?1", [map_id])
                .map_err(|e| to_storage_err(e.to_string()))?;
            tx.execute(
                "INSERT INTO memory_sets (map_id, last_updated, total_nodes)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(map_id) DO UPDATE SET
                    last_updated = excluded.last_updated,
                    total_nodes = excluded.total_nodes",
                params![map_id, set.last_updated.to_rfc3339(), set.nodes.len() as i64],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;

            {
                let mut insert = tx
                    .prepare(
                        "INSERT INTO waypoints
                            (map_id, ordinal, x, y, z, traffic_score, hazard_score,
                             observation_count, last_updated)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                    )
                    .map_err(|e| to_storage_err(e.to_string()))?;
                for (ordinal, node) in set.nodes.iter().enumerate() {
                    insert
                        .execute(params![
                            map_id,
                            ordinal as i64,
                            node.position.x,
                            node.position.y,
                            node.position.z,
                            node.traffic_score,
                            node.hazard_score,
                            i64::from(node.observation_count),
                            node.last_updated.to_rfc3339(),
                        ])
                        .map_err(|e| to_storage_err(e.to_string()))?;
                }
            }

            tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
            debug!(map_id, nodes = set.nodes.len(), "saved memory set");
            Ok(())
        })
    }

    fn list_maps(&self) -> WaymemResult<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT map_id FROM memory_sets ORDER BY map_id")
                .map_err(|e| to_storage_err(e.to_string()))?;
            let maps = stmt
                .query_map([], |row| row.get(0))
                .map_err(|e| to_storage_err(e.to_string()))?
                .collect::<Result<Vec<String>, _>>()
                .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(maps)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_is_at_latest_version() {
        let store = SqliteStore::open_in_memory().unwrap();
        let version = store
            .with_conn(|conn| migrations::current_version(conn))
            .unwrap();
        assert_eq!(version, migrations::LATEST_VERSION);
    }

    #[test]
    fn migrations_are_idempotent() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.with_conn(migrations::run_migrations).unwrap();
        let rows: i64 = store
            .with_conn(|conn| {
                conn.query_row("SELECT COUNT(*) FROM schema_version", [], |r| r.get(0))
                    .map_err(|e| to_storage_err(e.to_string()))
            })
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn unknown_map_loads_as_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.load("dm4").unwrap().is_none());
        assert!(store.list_maps().unwrap().is_empty());
    }
}
