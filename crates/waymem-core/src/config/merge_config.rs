use serde::{Deserialize, Serialize};

use super::defaults;

/// How baseline records that share a bucket are reduced before merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineCollision {
    /// The later baseline record replaces the earlier one.
    #[default]
    LastWriteWins,
    /// Colliding baseline records are blended like an incoming record.
    Blend,
}

/// Spatial merge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Edge length of a bucket cell, in world units.
    pub cell_size: f64,
    /// Blend weight of the historical record.
    pub weight_old: f64,
    /// Blend weight of the incoming record.
    pub weight_new: f64,
    /// Reduction applied to colliding baseline records.
    pub baseline_collision: BaselineCollision,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            cell_size: defaults::DEFAULT_CELL_SIZE,
            weight_old: defaults::DEFAULT_WEIGHT_OLD,
            weight_new: defaults::DEFAULT_WEIGHT_NEW,
            baseline_collision: BaselineCollision::default(),
        }
    }
}
