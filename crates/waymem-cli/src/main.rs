//! waymem CLI
//!
//! Turns game session logs into persistent bot memory.
//!
//! # Commands
//!
//! - `auto`: extract the latest dump, merge it into stored memory, prune,
//!   render the memory block and print statistics
//! - `extract`: store the latest dump without merging
//! - `stats`: report on a stored map
//! - `parse`: render the latest dump as a map waypoint block
//! - `learn-rj`: learn rocket-jump spots from player observation markers
//!
//! Exit code 0 on success or when there is nothing to process, 1 on error.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::error;

use waymem_cli::commands::{auto, extract, learn_rj, parse, stats};
use waymem_cli::{exit_code_for_error, is_missing_input, AppContext, CliExitCode};
use waymem_observability::init_tracing;

/// waymem - waypoint memory consolidation
#[derive(Parser)]
#[command(name = "waymem")]
#[command(version)]
#[command(about = "Consolidate bot waypoint memory from game session logs")]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (defaults to ./waymem.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, merge, prune, persist and render in one pass
    Auto(auto::AutoArgs),
    /// Store the latest dump as-is, without merging
    Extract(extract::ExtractArgs),
    /// Print statistics for a stored map
    Stats(stats::StatsArgs),
    /// Render the latest dump as a map waypoint block
    Parse(parse::ParseArgs),
    /// Learn rocket-jump spots from player observation markers
    LearnRj(learn_rj::LearnRjArgs),
}

fn dispatch(ctx: &AppContext, command: &Commands) -> anyhow::Result<()> {
    match command {
        Commands::Auto(args) => auto::run(ctx, args).map(drop),
        Commands::Extract(args) => extract::run(ctx, args).map(drop),
        Commands::Stats(args) => stats::run(ctx, args).map(drop),
        Commands::Parse(args) => parse::run(ctx, args).map(drop),
        Commands::LearnRj(args) => learn_rj::run(ctx, args).map(drop),
    }
}

fn main() {
    let cli = Cli::parse();

    let ctx = match AppContext::load(cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(CliExitCode::Failure.into());
        }
    };
    init_tracing(&ctx.config.observability, cli.verbose);

    let exit_code = match dispatch(&ctx, &cli.command) {
        Ok(()) => CliExitCode::Success,
        Err(e) if is_missing_input(&e) => {
            println!("nothing to process: {e:#}");
            exit_code_for_error(&e)
        }
        Err(e) => {
            let reason = format!("{e:#}");
            error!(error = %reason, "command failed");
            eprintln!("error: {reason}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit_code.into());
}
