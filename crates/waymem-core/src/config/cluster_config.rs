use serde::{Deserialize, Serialize};

use super::defaults;

/// Event clustering and rocket-jump validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Events strictly closer than this to a seed join its group.
    pub radius: f64,
    /// Minimum upward velocity for a successful rocket jump (u/s).
    pub min_upward_velocity: f64,
    /// Lowest accepted pitch angle (degrees, looking down).
    pub pitch_min: f64,
    /// Highest accepted pitch angle (degrees).
    pub pitch_max: f64,
    /// A death within this many seconds after the jump marks it failed.
    pub survival_window_secs: f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            radius: defaults::DEFAULT_CLUSTER_RADIUS,
            min_upward_velocity: defaults::DEFAULT_MIN_UPWARD_VELOCITY,
            pitch_min: defaults::DEFAULT_PITCH_MIN,
            pitch_max: defaults::DEFAULT_PITCH_MAX,
            survival_window_secs: defaults::DEFAULT_SURVIVAL_WINDOW_SECS,
        }
    }
}
