use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::position::Position;
use super::timestamp;
use crate::traits::Located;

/// A point of interest with accumulated traffic and hazard evidence.
///
/// Invariants: `observation_count >= 1`, both scores `>= 0`.
/// Field names on disk follow the legacy memory files. Deserialization goes
/// through [`RawWaypointRecord`] so loaded records obey the same guards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawWaypointRecord")]
pub struct WaypointRecord {
    #[serde(rename = "origin")]
    pub position: Position,
    pub traffic_score: f64,
    #[serde(rename = "danger_scent")]
    pub hazard_score: f64,
    #[serde(with = "timestamp")]
    pub last_updated: DateTime<Utc>,
    #[serde(rename = "sessions_seen")]
    pub observation_count: u32,
}

/// On-disk shape, accepted as-is and then clamped.
#[derive(Deserialize)]
struct RawWaypointRecord {
    origin: Position,
    traffic_score: f64,
    #[serde(rename = "danger_scent", alias = "hazard_score")]
    hazard_score: f64,
    #[serde(with = "timestamp")]
    last_updated: DateTime<Utc>,
    #[serde(
        rename = "sessions_seen",
        alias = "observation_count",
        default = "first_observation"
    )]
    observation_count: u32,
}

impl From<RawWaypointRecord> for WaypointRecord {
    fn from(raw: RawWaypointRecord) -> Self {
        WaypointRecord::observed_at(
            raw.origin,
            raw.traffic_score,
            raw.hazard_score,
            raw.last_updated,
        )
        .with_observation_count(raw.observation_count)
    }
}

fn first_observation() -> u32 {
    1
}

/// Negative and NaN scores become zero.
fn clamp_score(score: f64) -> f64 {
    if score.is_nan() || score < 0.0 {
        0.0
    } else {
        score
    }
}

impl WaypointRecord {
    /// A freshly observed record, stamped now.
    pub fn new(position: Position, traffic_score: f64, hazard_score: f64) -> Self {
        Self::observed_at(position, traffic_score, hazard_score, Utc::now())
    }

    /// A freshly observed record with an explicit timestamp.
    pub fn observed_at(
        position: Position,
        traffic_score: f64,
        hazard_score: f64,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            position,
            traffic_score: clamp_score(traffic_score),
            hazard_score: clamp_score(hazard_score),
            last_updated: at,
            observation_count: 1,
        }
    }

    /// Override the session count, e.g. when loading a persisted record.
    pub fn with_observation_count(mut self, count: u32) -> Self {
        self.observation_count = count.max(1);
        self
    }

    /// True when the record was folded in from more than one session.
    pub fn is_veteran(&self) -> bool {
        self.observation_count > 1
    }
}

impl Located for WaypointRecord {
    fn position(&self) -> &Position {
        &self.position
    }
}
