//! Dual-threshold pruning followed by min-max normalization.
//!
//! A record survives iff `traffic >= min_traffic || hazard >= min_hazard`.
//! Survivors are then rescaled so each score field tops out at the ceiling
//! (100 by default), which keeps repeated merge cycles from drifting upward.
//! Pruned records never influence the maxima.

use serde::Serialize;
use tracing::info;

use waymem_core::config::defaults::{
    DEFAULT_MIN_HAZARD, DEFAULT_MIN_TRAFFIC, DEFAULT_NORMALIZE_CEILING,
};
use waymem_core::config::PruneConfig;
use waymem_core::models::WaypointRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PruneReport {
    pub input: usize,
    pub removed: usize,
    pub remaining: usize,
    /// Maxima over survivors before rescaling; zero when nothing survived.
    pub max_traffic: f64,
    pub max_hazard: f64,
}

#[derive(Debug, Clone)]
pub struct PruneOutcome {
    pub records: Vec<WaypointRecord>,
    pub report: PruneReport,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PruneNormalizer {
    min_traffic: f64,
    min_hazard: f64,
    ceiling: f64,
}

impl PruneNormalizer {
    pub fn new(min_traffic: f64, min_hazard: f64) -> Self {
        Self {
            min_traffic,
            min_hazard,
            ceiling: DEFAULT_NORMALIZE_CEILING,
        }
    }

    pub fn with_ceiling(mut self, ceiling: f64) -> Self {
        self.ceiling = ceiling;
        self
    }

    pub fn from_config(config: &PruneConfig) -> Self {
        Self::new(config.min_traffic, config.min_hazard).with_ceiling(config.normalize_ceiling)
    }

    fn keeps(&self, record: &WaypointRecord) -> bool {
        record.traffic_score >= self.min_traffic || record.hazard_score >= self.min_hazard
    }

    /// Consumes `records`: pre-normalization scores are not reusable afterwards.
    /// Survivors keep their relative order. An empty result is valid.
    pub fn prune_and_normalize(&self, records: Vec<WaypointRecord>) -> PruneOutcome {
        let input = records.len();
        let mut survivors: Vec<WaypointRecord> =
            records.into_iter().filter(|r| self.keeps(r)).collect();

        let max_traffic = survivors.iter().map(|r| r.traffic_score).fold(0.0, f64::max);
        let max_hazard = survivors.iter().map(|r| r.hazard_score).fold(0.0, f64::max);

        for record in &mut survivors {
            if max_traffic > 0.0 {
                record.traffic_score = record.traffic_score / max_traffic * self.ceiling;
            }
            if max_hazard > 0.0 {
                record.hazard_score = record.hazard_score / max_hazard * self.ceiling;
            }
        }

        let report = PruneReport {
            input,
            removed: input - survivors.len(),
            remaining: survivors.len(),
            max_traffic,
            max_hazard,
        };
        info!(
            removed = report.removed,
            remaining = report.remaining,
            "pruned low-value waypoints"
        );

        PruneOutcome {
            records: survivors,
            report,
        }
    }
}

impl Default for PruneNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TRAFFIC, DEFAULT_MIN_HAZARD)
    }
}

/// Prune with the given thresholds and normalize to `[0, 100]`.
pub fn prune_and_normalize(
    records: Vec<WaypointRecord>,
    min_traffic: f64,
    min_hazard: f64,
) -> Vec<WaypointRecord> {
    PruneNormalizer::new(min_traffic, min_hazard)
        .prune_and_normalize(records)
        .records
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymem_core::models::Position;

    fn record(traffic: f64, hazard: f64) -> WaypointRecord {
        WaypointRecord::new(Position::default(), traffic, hazard)
    }

    #[test]
    fn reference_scenario() {
        let out = prune_and_normalize(vec![record(3.0, 1.0), record(6.0, 0.0)], 5.0, 2.0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].traffic_score, 100.0);
        assert_eq!(out[0].hazard_score, 0.0);
    }

    #[test]
    fn hazard_alone_keeps_a_record() {
        let out = prune_and_normalize(vec![record(0.0, 2.0)], 5.0, 2.0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].hazard_score, 100.0);
        assert_eq!(out[0].traffic_score, 0.0);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let out = prune_and_normalize(vec![record(5.0, 0.0), record(4.999, 1.999)], 5.0, 2.0);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let outcome = PruneNormalizer::default().prune_and_normalize(vec![]);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.report.max_traffic, 0.0);
    }

    #[test]
    fn everything_pruned_is_a_valid_state() {
        let outcome = PruneNormalizer::default().prune_and_normalize(vec![record(1.0, 1.0)]);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.report.removed, 1);
    }

    #[test]
    fn pruned_records_do_not_set_the_maximum() {
        // The 1.0/50.0 record survives on hazard; the 4.0/0 record is pruned.
        let out = prune_and_normalize(vec![record(1.0, 50.0), record(4.0, 0.0), record(10.0, 0.0)], 5.0, 2.0);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].traffic_score, 10.0);
        assert_eq!(out[1].traffic_score, 100.0);
    }

    #[test]
    fn survivors_keep_input_order() {
        let out = prune_and_normalize(vec![record(10.0, 0.0), record(40.0, 0.0), record(20.0, 0.0)], 5.0, 2.0);
        let traffic: Vec<f64> = out.iter().map(|r| r.traffic_score).collect();
        assert_eq!(traffic, vec![25.0, 100.0, 50.0]);
    }

    #[test]
    fn custom_ceiling_rescales() {
        let outcome = PruneNormalizer::default()
            .with_ceiling(1.0)
            .prune_and_normalize(vec![record(10.0, 4.0), record(5.0, 2.0)]);
        assert_eq!(outcome.records[0].traffic_score, 1.0);
        assert_eq!(outcome.records[1].hazard_score, 0.5);
    }
}
