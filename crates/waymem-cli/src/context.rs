//! Configuration shared by every command.

use std::path::{Path, PathBuf};

use waymem_core::config::WaymemConfig;
use waymem_core::errors::ConfigError;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "waymem.toml";

#[derive(Debug, Clone, Default)]
pub struct AppContext {
    pub config: WaymemConfig,
}

impl AppContext {
    pub fn new(config: WaymemConfig) -> Self {
        Self { config }
    }

    /// An explicit path must exist; the implicit `waymem.toml` may not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) => WaymemConfig::load(path)?,
            None => WaymemConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
        };
        Ok(Self::new(config))
    }

    /// `--out-dir` when given, else the configured output directory.
    pub fn output_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(&self.config.emit.output_dir))
    }
}
