//! Exit codes.

use waymem_core::errors::{ScanError, WaymemError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CliExitCode {
    /// Finished, or there was nothing to process.
    Success = 0,
    Failure = 1,
}

impl From<CliExitCode> for i32 {
    fn from(code: CliExitCode) -> Self {
        code as i32
    }
}

/// Missing log, or a log without a dump or markers.
pub fn is_missing_input(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<WaymemError>()
            .is_some_and(WaymemError::is_missing_input)
            || cause
                .downcast_ref::<ScanError>()
                .is_some_and(ScanError::is_missing_input)
    })
}

pub fn exit_code_for_error(err: &anyhow::Error) -> CliExitCode {
    if is_missing_input(err) {
        CliExitCode::Success
    } else {
        CliExitCode::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_log_exits_cleanly() {
        let err = anyhow::Error::new(ScanError::LogNotFound {
            path: PathBuf::from("qconsole.log"),
        });
        assert_eq!(exit_code_for_error(&err), CliExitCode::Success);
    }

    #[test]
    fn wrapped_missing_input_is_still_recognised() {
        let err = anyhow::Error::new(WaymemError::from(ScanError::NoDumpFound {
            source_name: "qconsole.log".to_string(),
        }))
        .context("auto pipeline");
        assert!(is_missing_input(&err));
    }

    #[test]
    fn other_errors_fail() {
        let err = anyhow::Error::new(WaymemError::RenderError {
            reason: "disk full".to_string(),
        });
        assert_eq!(i32::from(exit_code_for_error(&err)), 1);
    }
}
