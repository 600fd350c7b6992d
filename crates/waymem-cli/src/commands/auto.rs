//! `waymem auto`: extract, consolidate, persist, render, report.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::Args;
use rayon::prelude::*;
use tracing::{error, info, warn};

use waymem_consolidation::{ConsolidationEngine, ConsolidationResult};
use waymem_core::models::MemoryStats;
use waymem_core::traits::IMemoryStore;
use waymem_emit::{memory_file_name, render_memory, write_output};
use waymem_observability::{consolidation_span, emit_span, scan_span};
use waymem_scanner::log::read_log;
use waymem_scanner::{SessionDump, SessionScanner};
use waymem_storage::open_store;

use crate::commands::stats::format_stats;
use crate::context::AppContext;

#[derive(Debug, Clone, Args)]
pub struct AutoArgs {
    /// Session log to read
    #[arg(long)]
    pub log: PathBuf,

    /// Store the latest dump under this map name instead of the detected one
    #[arg(long, conflicts_with = "all_maps")]
    pub map: Option<String>,

    /// Process the latest dump of every map in the log, in parallel
    #[arg(long)]
    pub all_maps: bool,

    /// Directory for generated sources (defaults to `emit.output_dir`)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

/// What one map went through.
#[derive(Debug)]
pub struct MapReport {
    pub map: String,
    pub result: ConsolidationResult,
    pub output: PathBuf,
}

/// Scan the log and pick the dumps to process.
fn select_dumps(args: &AutoArgs) -> anyhow::Result<Vec<SessionDump>> {
    let source = args.log.display().to_string();
    let _span = scan_span!(source).entered();
    let text = read_log(&args.log)?;
    let scanner = SessionScanner::new();

    if args.all_maps {
        return Ok(scanner.scan_by_map(&text, &source)?);
    }
    let mut dump = scanner.scan(&text, &source)?;
    if let Some(map) = &args.map {
        if *map != dump.map {
            info!(detected = %dump.map, map = %map, "overriding detected map name");
        }
        dump.map = map.clone();
    }
    Ok(vec![dump])
}

fn process_map(
    engine: &ConsolidationEngine,
    store: &dyn IMemoryStore,
    ctx: &AppContext,
    out_dir: &Path,
    dump: SessionDump,
) -> anyhow::Result<MapReport> {
    let map = dump.map.clone();
    let result = {
        let _span = consolidation_span!(map, dump.records.len()).entered();
        engine
            .run_cycle(store, &map, dump.records)
            .with_context(|| format!("consolidating {map}"))?
    };

    let output = {
        let _span = emit_span!(map, "memory").entered();
        let text = render_memory(
            &map,
            &result.set.nodes,
            Utc::now(),
            ctx.config.emit.high_traffic_segment,
        );
        write_output(out_dir, &memory_file_name(&map), &text)?
    };

    Ok(MapReport { map, result, output })
}

pub fn run(ctx: &AppContext, args: &AutoArgs) -> anyhow::Result<Vec<MapReport>> {
    let dumps = select_dumps(args)?;
    let store = open_store(&ctx.config.storage)?;
    let engine = ConsolidationEngine::from_config(&ctx.config)?;
    let out_dir = ctx.output_dir(args.out_dir.as_deref());

    info!(maps = dumps.len(), "running consolidation pipeline");
    let outcomes: Vec<(String, anyhow::Result<MapReport>)> = dumps
        .into_par_iter()
        .map(|dump| {
            let map = dump.map.clone();
            (map, process_map(&engine, store.as_ref(), ctx, &out_dir, dump))
        })
        .collect();

    let total = outcomes.len();
    let mut reports = Vec::with_capacity(total);
    let mut failures = Vec::new();
    for (map, outcome) in outcomes {
        match outcome {
            Ok(report) => {
                print_report(&report);
                reports.push(report);
            }
            Err(e) => {
                let reason = format!("{e:#}");
                error!(map = %map, error = %reason, "map failed");
                failures.push(map);
            }
        }
    }

    if !failures.is_empty() {
        anyhow::bail!(
            "{} of {} maps failed: {}",
            failures.len(),
            total,
            failures.join(", ")
        );
    }
    Ok(reports)
}

fn print_report(report: &MapReport) {
    let result = &report.result;
    match &result.merge {
        Some(merge) => println!(
            "{}: merged {} stored + {} new -> {} ({} blended, {} new)",
            report.map, merge.baseline, merge.incoming, merge.output, merge.blended, merge.inserted
        ),
        None => println!("{}: first extraction, {} waypoints", report.map, result.prune.input),
    }
    if result.rejected_non_finite > 0 {
        warn!(map = %report.map, rejected = result.rejected_non_finite, "dropped non-finite waypoints");
    }
    println!(
        "{}: removed {} low-value waypoints, {} remain",
        report.map, result.prune.removed, result.prune.remaining
    );
    println!("{}: wrote {}", report.map, report.output.display());
    print!("{}", format_stats(&report.map, &MemoryStats::compute(&result.set.nodes)));
}
