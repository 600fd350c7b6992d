use std::cmp::Ordering;

use serde::Serialize;

use super::waypoint::WaypointRecord;
use crate::constants::STATS_TOP_N;

/// Summary of a record set, used for reports and generated headers.
#[derive(Debug, Clone, Serialize)]
pub struct MemoryStats {
    pub total: usize,
    pub avg_traffic: f64,
    pub avg_hazard: f64,
    /// Highest traffic first.
    pub top_traffic: Vec<WaypointRecord>,
    /// Highest hazard first.
    pub top_hazard: Vec<WaypointRecord>,
    /// Records seen in more than one session.
    pub veteran_count: usize,
    pub max_sessions: u32,
}

impl MemoryStats {
    pub fn compute(records: &[WaypointRecord]) -> Self {
        let total = records.len();
        let (avg_traffic, avg_hazard) = if total == 0 {
            (0.0, 0.0)
        } else {
            let n = total as f64;
            (
                records.iter().map(|r| r.traffic_score).sum::<f64>() / n,
                records.iter().map(|r| r.hazard_score).sum::<f64>() / n,
            )
        };

        let veterans: Vec<&WaypointRecord> = records.iter().filter(|r| r.is_veteran()).collect();

        Self {
            total,
            avg_traffic,
            avg_hazard,
            top_traffic: top_by(records, |r| r.traffic_score),
            top_hazard: top_by(records, |r| r.hazard_score),
            veteran_count: veterans.len(),
            max_sessions: veterans.iter().map(|r| r.observation_count).max().unwrap_or(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Stable descending sort, so equal scores keep input order.
fn top_by(records: &[WaypointRecord], key: impl Fn(&WaypointRecord) -> f64) -> Vec<WaypointRecord> {
    let mut sorted: Vec<&WaypointRecord> = records.iter().collect();
    sorted.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    sorted.into_iter().take(STATS_TOP_N).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    fn record(traffic: f64, hazard: f64, count: u32) -> WaypointRecord {
        WaypointRecord::new(Position::default(), traffic, hazard).with_observation_count(count)
    }

    #[test]
    fn empty_set_has_zero_averages() {
        let stats = MemoryStats::compute(&[]);
        assert!(stats.is_empty());
        assert_eq!(stats.avg_traffic, 0.0);
        assert_eq!(stats.max_sessions, 0);
    }

    #[test]
    fn averages_and_veterans() {
        let records = vec![record(10.0, 0.0, 1), record(30.0, 4.0, 3), record(20.0, 2.0, 2)];
        let stats = MemoryStats::compute(&records);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.avg_traffic, 20.0);
        assert_eq!(stats.avg_hazard, 2.0);
        assert_eq!(stats.veteran_count, 2);
        assert_eq!(stats.max_sessions, 3);
        assert_eq!(stats.top_traffic[0].traffic_score, 30.0);
        assert_eq!(stats.top_hazard[0].hazard_score, 4.0);
    }

    #[test]
    fn top_lists_are_capped() {
        let records: Vec<_> = (0..12).map(|i| record(i as f64, 0.0, 1)).collect();
        let stats = MemoryStats::compute(&records);
        assert_eq!(stats.top_traffic.len(), STATS_TOP_N);
        assert_eq!(stats.top_traffic[0].traffic_score, 11.0);
    }
}
