//! `waymem parse`: the latest dump as a map waypoint source block.

use std::path::PathBuf;

use clap::Args;
use tracing::warn;

use waymem_emit::render_map_waypoints;
use waymem_observability::emit_span;
use waymem_scanner::SessionScanner;

use crate::commands::emit_text;
use crate::context::AppContext;

#[derive(Debug, Clone, Args)]
pub struct ParseArgs {
    /// Session log to read
    #[arg(long)]
    pub log: PathBuf,

    /// Map name for the generated function
    #[arg(long)]
    pub map: String,

    /// Write here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Returns the rendered block.
pub fn run(_ctx: &AppContext, args: &ParseArgs) -> anyhow::Result<String> {
    let mut dumps = SessionScanner::new().scan_file_by_map(&args.log)?;

    // Prefer the named map's latest dump; otherwise take the newest dump.
    let idx = dumps
        .iter()
        .position(|d| d.map == args.map)
        .unwrap_or(dumps.len() - 1);
    let mut dump = dumps.swap_remove(idx);
    if dump.map != args.map {
        warn!(detected = %dump.map, map = %args.map, "no dump for map, using latest");
        dump.map = args.map.clone();
    }

    let _span = emit_span!(dump.map, "map_waypoints").entered();
    let text = render_map_waypoints(&dump);
    emit_text(args.output.as_deref(), &text)?;
    Ok(text)
}
