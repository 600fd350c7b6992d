//! Reference constants. Changing any of these changes merge outcomes.

pub const DEFAULT_CELL_SIZE: f64 = 32.0;
pub const DEFAULT_WEIGHT_OLD: f64 = 0.6;
pub const DEFAULT_WEIGHT_NEW: f64 = 0.4;

pub const DEFAULT_MIN_TRAFFIC: f64 = 5.0;
pub const DEFAULT_MIN_HAZARD: f64 = 2.0;
pub const DEFAULT_NORMALIZE_CEILING: f64 = 100.0;

pub const DEFAULT_CLUSTER_RADIUS: f64 = 128.0;
pub const DEFAULT_MIN_UPWARD_VELOCITY: f64 = 200.0;
pub const DEFAULT_PITCH_MIN: f64 = -90.0;
pub const DEFAULT_PITCH_MAX: f64 = -20.0;
pub const DEFAULT_SURVIVAL_WINDOW_SECS: f64 = 2.0;

pub const DEFAULT_DB_PATH: &str = "waymem.db";
pub const DEFAULT_MEMORY_DIR: &str = "bot_memory";

pub const DEFAULT_HIGH_TRAFFIC_SEGMENT: usize = 10;
pub const DEFAULT_OUTPUT_DIR: &str = "maps";

pub const DEFAULT_LOG_LEVEL: &str = "info";
