//! Convex blending of a historical record with a newly observed one.

use chrono::{DateTime, Utc};

use waymem_core::config::defaults::{DEFAULT_WEIGHT_NEW, DEFAULT_WEIGHT_OLD};
use waymem_core::constants::WEIGHT_SUM_TOLERANCE;
use waymem_core::errors::ConfigError;
use waymem_core::models::WaypointRecord;

/// Historical / incoming weights. Each in `[0, 1]`, summing to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights {
    old: f64,
    new: f64,
}

impl BlendWeights {
    /// 60% history, 40% new session.
    pub const REFERENCE: Self = Self {
        old: DEFAULT_WEIGHT_OLD,
        new: DEFAULT_WEIGHT_NEW,
    };

    pub fn new(old: f64, new: f64) -> Result<Self, ConfigError> {
        let in_range = |w: f64| (0.0..=1.0).contains(&w);
        if !in_range(old) || !in_range(new) || (old + new - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidValue {
                field: "merge.weight_old".to_string(),
                message: format!("weights must lie in [0, 1] and sum to 1.0, got {old} + {new}"),
            });
        }
        Ok(Self { old, new })
    }

    pub fn old(&self) -> f64 {
        self.old
    }

    pub fn new_weight(&self) -> f64 {
        self.new
    }
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Blend `new` into `old`, stamped now. See [`blend_at`].
pub fn blend(old: &WaypointRecord, new: &WaypointRecord, weights: BlendWeights) -> WaypointRecord {
    blend_at(old, new, weights, Utc::now())
}

/// Position comes from `new`; scores are the weighted combination;
/// the session count grows by exactly one.
pub fn blend_at(
    old: &WaypointRecord,
    new: &WaypointRecord,
    weights: BlendWeights,
    now: DateTime<Utc>,
) -> WaypointRecord {
    WaypointRecord {
        position: new.position,
        traffic_score: old.traffic_score * weights.old + new.traffic_score * weights.new,
        hazard_score: old.hazard_score * weights.old + new.hazard_score * weights.new,
        last_updated: now,
        observation_count: old.observation_count.saturating_add(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymem_core::models::Position;

    fn record(pos: (f64, f64, f64), traffic: f64, hazard: f64, count: u32) -> WaypointRecord {
        WaypointRecord::new(pos.into(), traffic, hazard).with_observation_count(count)
    }

    #[test]
    fn reference_weights_sum_to_one() {
        let w = BlendWeights::REFERENCE;
        assert!((w.old() + w.new_weight() - 1.0).abs() < 1e-12);
        assert_eq!(BlendWeights::default(), w);
    }

    #[test]
    fn blends_scores_and_takes_new_position() {
        let old = record((0.0, 0.0, 0.0), 10.0, 5.0, 1);
        let new = record((1.0, 1.0, 1.0), 20.0, 0.0, 1);
        let now = Utc::now();
        let merged = blend_at(&old, &new, BlendWeights::REFERENCE, now);
        assert!((merged.traffic_score - 14.0).abs() < 1e-9);
        assert!((merged.hazard_score - 3.0).abs() < 1e-9);
        assert_eq!(merged.position, Position::new(1.0, 1.0, 1.0));
        assert_eq!(merged.observation_count, 2);
        assert_eq!(merged.last_updated, now);
    }

    #[test]
    fn count_builds_on_old_record_only() {
        let old = record((0.0, 0.0, 0.0), 1.0, 1.0, 7);
        let new = record((0.0, 0.0, 0.0), 1.0, 1.0, 4);
        assert_eq!(blend(&old, &new, BlendWeights::REFERENCE).observation_count, 8);
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        assert!(BlendWeights::new(0.5, 0.6).is_err());
        assert!(BlendWeights::new(1.2, -0.2).is_err());
        assert!(BlendWeights::new(0.5, 0.5).is_ok());
        assert!(BlendWeights::new(1.0, 0.0).is_ok());
    }
}
