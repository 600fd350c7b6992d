use serde::{Deserialize, Serialize};

use super::defaults;

/// Static-data emission configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    /// Size of the leading "high traffic" segment.
    pub high_traffic_segment: usize,
    /// Directory generated files are written to.
    pub output_dir: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            high_traffic_segment: defaults::DEFAULT_HIGH_TRAFFIC_SEGMENT,
            output_dir: defaults::DEFAULT_OUTPUT_DIR.to_string(),
        }
    }
}
