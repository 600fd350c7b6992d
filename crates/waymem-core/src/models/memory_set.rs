use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;
use super::waypoint::WaypointRecord;

/// Everything persisted for one map: its ordered records plus aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedMemorySet {
    pub map: String,
    #[serde(with = "timestamp")]
    pub last_updated: DateTime<Utc>,
    pub total_nodes: usize,
    pub nodes: Vec<WaypointRecord>,
}

impl PersistedMemorySet {
    /// Build a set whose `total_nodes` matches `nodes`.
    pub fn new(map: impl Into<String>, nodes: Vec<WaypointRecord>, at: DateTime<Utc>) -> Self {
        Self {
            map: map.into(),
            last_updated: at,
            total_nodes: nodes.len(),
            nodes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
