use std::path::PathBuf;

/// Errors raised while reading session logs.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("session log not found: {path}")]
    LogNotFound { path: PathBuf },

    #[error("no waypoint dump block found in {source_name}")]
    NoDumpFound { source_name: String },

    #[error("no rocket jump markers found in {source_name}")]
    NoEventsFound { source_name: String },

    #[error("IO error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed record `{raw}`: {reason}")]
    MalformedRecord { raw: String, reason: String },
}

impl ScanError {
    /// Missing file or missing marker block. Not fatal to the pipeline.
    pub fn is_missing_input(&self) -> bool {
        matches!(
            self,
            Self::LogNotFound { .. } | Self::NoDumpFound { .. } | Self::NoEventsFound { .. }
        )
    }
}
