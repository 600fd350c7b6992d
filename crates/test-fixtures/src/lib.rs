//! Shared builders and sample session logs for waymem tests.

use chrono::{DateTime, TimeZone, Utc};

use waymem_core::models::{EventRecord, PersistedMemorySet, Position, WaypointRecord};

/// Two dump blocks (dm3 then dm4). The dm4 block has one malformed vector,
/// doubled quotes, odd spacing, and a trailing target argument.
pub const SESSION_LOG: &str = include_str!("../data/session_qconsole.log");

/// Has an opening marker but no closing one.
pub const NO_DUMP_LOG: &str = include_str!("../data/no_dump_qconsole.log");

/// Six rocket jump markers: three succeed (two of them close together),
/// one is too slow, one has the wrong pitch, one ends in a death.
pub const ROCKET_JUMP_LOG: &str = include_str!("../data/rocket_jump_qconsole.log");

/// Memory file in the shape older tooling wrote (naive timestamps,
/// one node without `sessions_seen`).
pub const LEGACY_MEMORY_JSON: &str = include_str!("../data/dm4_legacy.json");

/// A fixed instant so generated output is reproducible.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 3, 10, 41, 2).unwrap()
}

pub fn waypoint(x: f64, y: f64, z: f64, traffic: f64, hazard: f64) -> WaypointRecord {
    WaypointRecord::observed_at(Position::new(x, y, z), traffic, hazard, fixed_time())
}

pub fn waypoint_seen(x: f64, y: f64, z: f64, traffic: f64, hazard: f64, count: u32) -> WaypointRecord {
    waypoint(x, y, z, traffic, hazard).with_observation_count(count)
}

/// `n` records along the x axis, one per `spacing` units, traffic rising with index.
pub fn waypoint_line(n: usize, spacing: f64) -> Vec<WaypointRecord> {
    (0..n)
        .map(|i| waypoint(i as f64 * spacing, 0.0, 0.0, 5.0 + i as f64, (i % 3) as f64))
        .collect()
}

pub fn memory_set(map: &str, nodes: Vec<WaypointRecord>) -> PersistedMemorySet {
    PersistedMemorySet::new(map, nodes, fixed_time())
}

pub fn event(x: f64, y: f64, z: f64, score: f64) -> EventRecord<()> {
    EventRecord::new(Position::new(x, y, z), score, ())
}
