//! # waymem-emit
//!
//! Text renderers for the game's static data files. Every renderer takes
//! its timestamp as an argument, so identical input renders identical text.

pub mod map_waypoints;
pub mod memory;
pub mod rocket_jump;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use waymem_core::errors::{WaymemError, WaymemResult};

pub use map_waypoints::{normalize_quotes, render_map_waypoints};
pub use memory::{format_record, render_memory};
pub use rocket_jump::render_rocket_jumps;

/// File names the renderers' output is written under.
pub fn memory_file_name(map: &str) -> String {
    format!("{map}_memory.qc")
}

pub fn map_waypoints_file_name(map: &str) -> String {
    format!("{map}_waypoints.qc")
}

pub fn rocket_jump_file_name(map: &str) -> String {
    format!("{map}_learned_rj.qc")
}

/// Write `contents` to `dir/file_name`, creating `dir` when needed.
pub fn write_output(dir: &Path, file_name: &str, contents: &str) -> WaymemResult<PathBuf> {
    let render_err = |e: std::io::Error| WaymemError::RenderError {
        reason: format!("cannot write {file_name} in {}: {e}", dir.display()),
    };
    fs::create_dir_all(dir).map_err(render_err)?;
    let path = dir.join(file_name);
    fs::write(&path, contents).map_err(render_err)?;
    info!(path = %path.display(), bytes = contents.len(), "wrote generated source");
    Ok(path)
}
