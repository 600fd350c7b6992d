//! Layered configuration. Every section is `#[serde(default)]`, so an empty or
//! partial TOML file yields the reference behavior for everything it omits.

mod cluster_config;
pub mod defaults;
mod emit_config;
mod merge_config;
mod observability_config;
mod prune_config;
mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use cluster_config::ClusterConfig;
pub use emit_config::EmitConfig;
pub use merge_config::{BaselineCollision, MergeConfig};
pub use observability_config::ObservabilityConfig;
pub use prune_config::PruneConfig;
pub use storage_config::{StorageBackend, StorageConfig};

use crate::constants::WEIGHT_SUM_TOLERANCE;
use crate::errors::ConfigError;

/// Root configuration for the whole pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WaymemConfig {
    pub merge: MergeConfig,
    pub prune: PruneConfig,
    pub cluster: ClusterConfig,
    pub storage: StorageConfig,
    pub emit: EmitConfig,
    pub observability: ObservabilityConfig,
}

impl WaymemConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Self::parse(source, "<inline>")
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let source = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: display.clone(),
            },
            _ => ConfigError::ParseError {
                path: display.clone(),
                message: e.to_string(),
            },
        })?;
        Self::parse(&source, &display)
    }

    /// Load `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn parse(source: &str, path: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::ParseError {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let merge = &self.merge;
        if !(merge.cell_size.is_finite() && merge.cell_size > 0.0) {
            return Err(ConfigError::invalid(
                "merge.cell_size",
                format!("must be a positive finite number, got {}", merge.cell_size),
            ));
        }
        for (field, weight) in [
            ("merge.weight_old", merge.weight_old),
            ("merge.weight_new", merge.weight_new),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(ConfigError::invalid(
                    field,
                    format!("must lie in [0, 1], got {weight}"),
                ));
            }
        }
        if (merge.weight_old + merge.weight_new - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::invalid(
                "merge.weight_old",
                format!(
                    "weights must sum to 1.0, got {} + {}",
                    merge.weight_old, merge.weight_new
                ),
            ));
        }

        let prune = &self.prune;
        for (field, threshold) in [
            ("prune.min_traffic", prune.min_traffic),
            ("prune.min_hazard", prune.min_hazard),
        ] {
            if !(threshold.is_finite() && threshold >= 0.0) {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be a non-negative number, got {threshold}"),
                ));
            }
        }
        if !(prune.normalize_ceiling.is_finite() && prune.normalize_ceiling > 0.0) {
            return Err(ConfigError::invalid(
                "prune.normalize_ceiling",
                format!("must be positive, got {}", prune.normalize_ceiling),
            ));
        }

        let cluster = &self.cluster;
        if !(cluster.radius.is_finite() && cluster.radius > 0.0) {
            return Err(ConfigError::invalid(
                "cluster.radius",
                format!("must be a positive finite number, got {}", cluster.radius),
            ));
        }
        if cluster.pitch_min > cluster.pitch_max {
            return Err(ConfigError::invalid(
                "cluster.pitch_min",
                format!(
                    "must not exceed pitch_max ({} > {})",
                    cluster.pitch_min, cluster.pitch_max
                ),
            ));
        }

        Ok(())
    }
}
