use serde::{Deserialize, Serialize};

use super::defaults;

/// Pruning and normalization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PruneConfig {
    /// Records at or above this traffic score survive.
    pub min_traffic: f64,
    /// Records at or above this hazard score survive.
    pub min_hazard: f64,
    /// Upper bound of the normalized score range.
    pub normalize_ceiling: f64,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            min_traffic: defaults::DEFAULT_MIN_TRAFFIC,
            min_hazard: defaults::DEFAULT_MIN_HAZARD,
            normalize_ceiling: defaults::DEFAULT_NORMALIZE_CEILING,
        }
    }
}
