//! `waymem extract`: store the latest dump as-is, without merging.

use std::path::PathBuf;

use chrono::Utc;
use clap::Args;
use tracing::info;

use waymem_core::models::PersistedMemorySet;
use waymem_observability::{scan_span, store_span};
use waymem_scanner::SessionScanner;
use waymem_storage::open_store;

use crate::context::AppContext;

#[derive(Debug, Clone, Args)]
pub struct ExtractArgs {
    /// Session log to read
    #[arg(long)]
    pub log: PathBuf,
}

pub fn run(ctx: &AppContext, args: &ExtractArgs) -> anyhow::Result<PersistedMemorySet> {
    let dump = {
        let _span = scan_span!(args.log.display()).entered();
        SessionScanner::new().scan_file(&args.log)?
    };
    if let Some((expected, parsed)) = dump.count_mismatch() {
        println!("warning: dump lists {expected} waypoints, parsed {parsed}");
    }

    let set = PersistedMemorySet::new(dump.map.clone(), dump.records, Utc::now());
    {
        let _span = store_span!(ctx.config.storage.backend, set.map).entered();
        open_store(&ctx.config.storage)?.save(&set.map, &set)?;
    }
    info!(map = %set.map, nodes = set.total_nodes, "stored raw extraction");
    println!("extracted {} waypoints for {}", set.total_nodes, set.map);
    Ok(set)
}
