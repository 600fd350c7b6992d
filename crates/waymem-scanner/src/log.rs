//! Reading session logs from disk.

use std::path::Path;

use waymem_core::errors::ScanError;

/// Read a log as text. Invalid UTF-8 is replaced, never fatal; console logs
/// routinely carry stray bytes.
pub fn read_log(path: &Path) -> Result<String, ScanError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ScanError::LogNotFound {
            path: path.to_path_buf(),
        },
        _ => ScanError::IoError {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
