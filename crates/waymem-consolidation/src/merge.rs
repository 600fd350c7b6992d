//! Bucket merge of a fresh session into a persisted baseline.
//!
//! Baseline records seed one slot per bucket. Each incoming record either
//! blends into the slot of its bucket or opens a new slot unchanged.
//! Output order is deterministic: baseline slots in baseline order, then
//! fresh discoveries in incoming order.

use std::collections::hash_map::Entry;

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, info, warn};

use waymem_core::config::{BaselineCollision, MergeConfig};
use waymem_core::errors::ConfigError;
use waymem_core::models::WaypointRecord;

use crate::algorithms::blend::{blend_at, BlendWeights};
use crate::algorithms::spatial::{BucketKey, SpatialBucketIndex};

/// Counters describing one merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub baseline: usize,
    pub incoming: usize,
    /// Incoming records folded into an existing slot.
    pub blended: usize,
    /// Incoming records that opened a new slot.
    pub inserted: usize,
    /// Baseline records that shared a bucket with an earlier baseline record.
    pub baseline_collisions: usize,
    pub output: usize,
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub records: Vec<WaypointRecord>,
    pub report: MergeReport,
}

/// Merges record sets through a [`SpatialBucketIndex`].
#[derive(Debug, Clone)]
pub struct MergeEngine {
    index: SpatialBucketIndex,
    weights: BlendWeights,
    collision: BaselineCollision,
}

impl MergeEngine {
    pub fn new(index: SpatialBucketIndex, weights: BlendWeights) -> Self {
        Self {
            index,
            weights,
            collision: BaselineCollision::LastWriteWins,
        }
    }

    pub fn with_collision_policy(mut self, policy: BaselineCollision) -> Self {
        self.collision = policy;
        self
    }

    pub fn from_config(config: &MergeConfig) -> Result<Self, ConfigError> {
        let index = SpatialBucketIndex::new(config.cell_size)?;
        let weights = BlendWeights::new(config.weight_old, config.weight_new)?;
        Ok(Self::new(index, weights).with_collision_policy(config.baseline_collision))
    }

    pub fn index(&self) -> &SpatialBucketIndex {
        &self.index
    }

    pub fn weights(&self) -> BlendWeights {
        self.weights
    }

    /// Merge stamped now. See [`MergeEngine::merge_at`].
    pub fn merge(&self, baseline: &[WaypointRecord], incoming: &[WaypointRecord]) -> MergeOutcome {
        self.merge_at(baseline, incoming, Utc::now())
    }

    /// Merge `incoming` into `baseline`; every blend is stamped `now`.
    ///
    /// Both inputs must hold finite coordinates only.
    pub fn merge_at(
        &self,
        baseline: &[WaypointRecord],
        incoming: &[WaypointRecord],
        now: DateTime<Utc>,
    ) -> MergeOutcome {
        let mut report = MergeReport {
            baseline: baseline.len(),
            incoming: incoming.len(),
            ..MergeReport::default()
        };
        let mut slots: Vec<WaypointRecord> = Vec::with_capacity(baseline.len() + incoming.len());
        let mut by_bucket: FxHashMap<BucketKey, usize> = FxHashMap::default();

        for record in baseline {
            match by_bucket.entry(self.index.key(&record.position)) {
                Entry::Occupied(slot) => {
                    report.baseline_collisions += 1;
                    let existing = &mut slots[*slot.get()];
                    *existing = match self.collision {
                        BaselineCollision::LastWriteWins => record.clone(),
                        BaselineCollision::Blend => blend_at(existing, record, self.weights, now),
                    };
                }
                Entry::Vacant(slot) => {
                    slot.insert(slots.len());
                    slots.push(record.clone());
                }
            }
        }

        if report.baseline_collisions > 0 {
            warn!(
                collisions = report.baseline_collisions,
                policy = ?self.collision,
                "baseline records share buckets"
            );
        }

        for record in incoming {
            match by_bucket.entry(self.index.key(&record.position)) {
                Entry::Occupied(slot) => {
                    let existing = &mut slots[*slot.get()];
                    *existing = blend_at(existing, record, self.weights, now);
                    report.blended += 1;
                }
                Entry::Vacant(slot) => {
                    slot.insert(slots.len());
                    slots.push(record.clone());
                    report.inserted += 1;
                }
            }
        }

        report.output = slots.len();
        debug!(cell_size = self.index.cell_size(), "bucket merge done");
        info!(
            output = report.output,
            baseline = report.baseline,
            incoming = report.incoming,
            blended = report.blended,
            inserted = report.inserted,
            "merged waypoint sets"
        );

        MergeOutcome {
            records: slots,
            report,
        }
    }
}

impl Default for MergeEngine {
    fn default() -> Self {
        Self::new(SpatialBucketIndex::default(), BlendWeights::REFERENCE)
    }
}

/// Merge with the reference 0.6 / 0.4 weights at `cell_size` (positive).
pub fn merge(
    baseline: &[WaypointRecord],
    incoming: &[WaypointRecord],
    cell_size: f64,
) -> Vec<WaypointRecord> {
    MergeEngine::new(SpatialBucketIndex::unchecked(cell_size), BlendWeights::REFERENCE)
        .merge(baseline, incoming)
        .records
}
