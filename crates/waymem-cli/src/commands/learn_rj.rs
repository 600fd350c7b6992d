//! `waymem learn-rj`: successful rocket jumps, clustered into spots.

use std::path::PathBuf;

use clap::Args;

use waymem_consolidation::ProximityClusterer;
use waymem_core::models::EventRecord;
use waymem_emit::render_rocket_jumps;
use waymem_observability::{emit_span, scan_span};
use waymem_scanner::{RocketJump, RocketJumpScanner};

use crate::commands::emit_text;
use crate::context::AppContext;

#[derive(Debug, Clone, Args)]
pub struct LearnRjArgs {
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

#[derive(Debug)]
pub struct LearnSummary {
    pub attempts: usize,
    pub successful: usize,
    pub representatives: Vec<EventRecord<RocketJump>>,
}

pub fn run(ctx: &AppContext, args: &LearnRjArgs) -> anyhow::Result<LearnSummary> {
    let scan = {
        let _span = scan_span!(args.log.display()).entered();
        RocketJumpScanner::from_config(&ctx.config.cluster).scan_file(&args.log)?
    };
    let successful = scan.successful.len();
    let clusterer = ProximityClusterer::new(ctx.config.cluster.radius)?;
    let representatives = clusterer.cluster(scan.successful);

    let text = {
        let _span = emit_span!(args.map, "rocket_jumps").entered();
        render_rocket_jumps(&args.map, &representatives)
    };
    emit_text(args.output.as_deref(), &text)?;

    // Keep stdout clean when it carries the generated block.
    let report = |line: String| {
        if args.output.is_some() {
            println!("{line}");
        } else {
            eprintln!("{line}");
        }
    };
    report(format!(
        "rocket jumps: {} attempts, {} successful, {} unique spots",
        scan.attempts,
        successful,
        representatives.len()
    ));
    if !representatives.is_empty() {
        let n = representatives.len() as f64;
        let avg = representatives.iter().map(|e| e.score).sum::<f64>() / n;
        let max = representatives.iter().map(|e| e.score).fold(f64::MIN, f64::max);
        report(format!("velocity gain: avg {avg:.1} u/s, max {max:.1} u/s"));
    }

    Ok(LearnSummary {
        attempts: scan.attempts,
        successful,
        representatives,
    })
}
