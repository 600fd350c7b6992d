//! ConsolidationEngine: admission → merge → prune/normalize, and the
//! read-merge-write cycle against an [`IMemoryStore`].

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use waymem_core::config::WaymemConfig;
use waymem_core::errors::{ConfigError, WaymemError, WaymemResult};
use waymem_core::models::{PersistedMemorySet, WaypointRecord};
use waymem_core::traits::IMemoryStore;

use crate::merge::{MergeEngine, MergeReport};
use crate::prune::{PruneNormalizer, PruneReport};

/// Outcome of one consolidation cycle for one map.
#[derive(Debug, Clone)]
pub struct ConsolidationResult {
    pub set: PersistedMemorySet,
    /// `None` on first extraction, when there was no baseline to merge into.
    pub merge: Option<MergeReport>,
    pub prune: PruneReport,
    /// Records dropped before merging because a coordinate or score was NaN
    /// or infinite.
    pub rejected_non_finite: usize,
}

/// Stateless apart from its parameters; one instance can serve many maps.
#[derive(Debug, Clone, Default)]
pub struct ConsolidationEngine {
    merge: MergeEngine,
    prune: PruneNormalizer,
}

impl ConsolidationEngine {
    pub fn new(merge: MergeEngine, prune: PruneNormalizer) -> Self {
        Self { merge, prune }
    }

    pub fn from_config(config: &WaymemConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            MergeEngine::from_config(&config.merge)?,
            PruneNormalizer::from_config(&config.prune),
        ))
    }

    pub fn merge_engine(&self) -> &MergeEngine {
        &self.merge
    }

    pub fn consolidate(
        &self,
        map: &str,
        baseline: Option<&PersistedMemorySet>,
        incoming: Vec<WaypointRecord>,
    ) -> ConsolidationResult {
        self.consolidate_at(map, baseline, incoming, Utc::now())
    }

    /// Produce the next memory set for `map`. The baseline is borrowed, never
    /// mutated; the returned set is stamped `now`.
    pub fn consolidate_at(
        &self,
        map: &str,
        baseline: Option<&PersistedMemorySet>,
        incoming: Vec<WaypointRecord>,
        now: DateTime<Utc>,
    ) -> ConsolidationResult {
        let (incoming, mut rejected_non_finite) = admit(incoming);

        let (merged, merge) = match baseline {
            Some(set) if !set.nodes.is_empty() => {
                let (baseline, rejected) = admit(set.nodes.clone());
                rejected_non_finite += rejected;
                info!(map, existing = baseline.len(), "loaded baseline");
                let outcome = self.merge.merge_at(&baseline, &incoming, now);
                (outcome.records, Some(outcome.report))
            }
            _ => {
                info!(map, nodes = incoming.len(), "first-time extraction, no baseline");
                (incoming, None)
            }
        };

        let pruned = self.prune.prune_and_normalize(merged);

        ConsolidationResult {
            set: PersistedMemorySet::new(map, pruned.records, now),
            merge,
            prune: pruned.report,
            rejected_non_finite,
        }
    }

    /// Read-merge-write for one map: a single `load`, a single `save`.
    ///
    /// Not a transaction. Two concurrent cycles on the same map race.
    pub fn run_cycle(
        &self,
        store: &dyn IMemoryStore,
        map: &str,
        incoming: Vec<WaypointRecord>,
    ) -> WaymemResult<ConsolidationResult> {
        let baseline = store.load(map)?;
        let result = self.consolidate(map, baseline.as_ref(), incoming);
        store.save(map, &result.set)?;
        info!(map, nodes = result.set.total_nodes, "saved memory set");
        Ok(result)
    }
}

/// Error for a record the bucket index or the normalizer cannot take.
pub fn check_finite(record: &WaypointRecord) -> WaymemResult<()> {
    let p = record.position;
    if !p.is_finite() {
        return Err(WaymemError::NonFiniteCoordinate {
            x: p.x,
            y: p.y,
            z: p.z,
        });
    }
    if !(record.traffic_score.is_finite() && record.hazard_score.is_finite()) {
        return Err(WaymemError::NonFiniteScore {
            traffic: record.traffic_score,
            hazard: record.hazard_score,
        });
    }
    Ok(())
}

/// Keep fully finite records; count the rest.
fn admit(records: Vec<WaypointRecord>) -> (Vec<WaypointRecord>, usize) {
    let total = records.len();
    let admitted: Vec<WaypointRecord> = records
        .into_iter()
        .filter(|r| match check_finite(r) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "rejecting waypoint");
                false
            }
        })
        .collect();
    let rejected = total - admitted.len();
    (admitted, rejected)
}
