//! Error taxonomy.
//!
//! Each subsystem has its own `thiserror` enum; `WaymemError` wraps them so
//! callers can propagate with `?` across crate boundaries.

mod config_error;
mod scan_error;
mod storage_error;

pub use config_error::ConfigError;
pub use scan_error::ScanError;
pub use storage_error::StorageError;

/// Crate-wide result alias.
pub type WaymemResult<T> = Result<T, WaymemError>;

/// Top-level error type for the waypoint memory system.
#[derive(Debug, thiserror::Error)]
pub enum WaymemError {
    #[error("scan error: {0}")]
    ScanError(#[from] ScanError),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("non-finite coordinate: ({x}, {y}, {z})")]
    NonFiniteCoordinate { x: f64, y: f64, z: f64 },

    #[error("non-finite score: traffic {traffic}, hazard {hazard}")]
    NonFiniteScore { traffic: f64, hazard: f64 },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("render error: {reason}")]
    RenderError { reason: String },
}

impl WaymemError {
    /// True for recoverable input absence: no session log or no dump block.
    /// The pipeline reports "nothing to process" and leaves stored state alone.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::ScanError(e) if e.is_missing_input())
    }
}
