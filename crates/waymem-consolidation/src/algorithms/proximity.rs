//! Greedy proximity grouping with best-of-group selection.
//!
//! Unlike bucket merging this uses true Euclidean distance (O(n²) worst case)
//! and keeps one survivor per group instead of averaging. Grouping is greedy
//! and order-dependent: seeds are taken in input order, and every still
//! unassigned item strictly within `radius` of the seed joins its group.
//! Representatives are not guaranteed to be `radius` apart from each other.

use waymem_core::config::defaults::DEFAULT_CLUSTER_RADIUS;
use waymem_core::errors::ConfigError;
use waymem_core::models::EventRecord;
use waymem_core::traits::Located;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityClusterer {
    radius: f64,
}

impl ProximityClusterer {
    pub fn new(radius: f64) -> Result<Self, ConfigError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "cluster.radius".to_string(),
                message: format!("must be a positive finite number, got {radius}"),
            });
        }
        Ok(Self { radius })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Member indices of each group, groups in seed order, seed first.
    /// Every index appears in exactly one group.
    pub fn groups<T: Located>(&self, items: &[T]) -> Vec<Vec<usize>> {
        let mut assigned = vec![false; items.len()];
        let mut groups = Vec::new();

        for seed in 0..items.len() {
            if assigned[seed] {
                continue;
            }
            assigned[seed] = true;
            let origin = items[seed].position();
            let mut group = vec![seed];

            // Everything before `seed` is already assigned.
            for other in (seed + 1)..items.len() {
                if !assigned[other] && origin.distance(items[other].position()) < self.radius {
                    assigned[other] = true;
                    group.push(other);
                }
            }
            groups.push(group);
        }

        groups
    }

    /// Reduce each group to its highest-scoring member. Ties go to the
    /// member met first (the seed, then input order).
    pub fn reduce_by<T, F>(&self, items: Vec<T>, score: F) -> Vec<T>
    where
        T: Located,
        F: Fn(&T) -> f64,
    {
        let groups = self.groups(&items);
        let winners: Vec<usize> = groups
            .iter()
            .map(|group| {
                let mut best = group[0];
                let mut best_score = score(&items[best]);
                for &idx in &group[1..] {
                    let s = score(&items[idx]);
                    if s > best_score {
                        best = idx;
                        best_score = s;
                    }
                }
                best
            })
            .collect();

        let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
        winners
            .into_iter()
            .filter_map(|idx| slots[idx].take())
            .collect()
    }

    /// Representatives ranked by each event's own `score`.
    pub fn cluster<M>(&self, events: Vec<EventRecord<M>>) -> Vec<EventRecord<M>> {
        self.reduce_by(events, |e| e.score)
    }

    /// Representatives ranked by a caller-chosen scoring function.
    pub fn cluster_by<M, F>(&self, events: Vec<EventRecord<M>>, score: F) -> Vec<EventRecord<M>>
    where
        F: Fn(&EventRecord<M>) -> f64,
    {
        self.reduce_by(events, score)
    }
}

impl Default for ProximityClusterer {
    fn default() -> Self {
        Self {
            radius: DEFAULT_CLUSTER_RADIUS,
        }
    }
}

/// Cluster `events` at `radius` (positive) and keep each group's best scorer.
pub fn cluster<M>(events: Vec<EventRecord<M>>, radius: f64) -> Vec<EventRecord<M>> {
    ProximityClusterer { radius }.cluster(events)
}
