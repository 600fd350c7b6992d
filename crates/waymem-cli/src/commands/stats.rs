//! `waymem stats MAP`

use clap::Args;

use waymem_core::models::{MemoryStats, Position};
use waymem_storage::open_store;

use crate::context::AppContext;

#[derive(Debug, Clone, Args)]
pub struct StatsArgs {
    /// Map whose stored memory to summarise
    pub map: String,
}

fn coords(p: &Position) -> String {
    format!("({:.1}, {:.1}, {:.1})", p.x, p.y, p.z)
}

/// Human-readable report for one map.
pub fn format_stats(map: &str, stats: &MemoryStats) -> String {
    let title = format!("STATISTICS FOR {}", map.to_uppercase());
    let mut lines = vec![
        title.clone(),
        "=".repeat(title.len()),
        format!("Total Waypoints: {}", stats.total),
        format!("Avg Traffic Score: {:.1}", stats.avg_traffic),
        format!("Avg Danger Scent: {:.1}", stats.avg_hazard),
        String::new(),
        format!("TOP {} HIGHWAYS:", stats.top_traffic.len()),
    ];
    for (i, r) in stats.top_traffic.iter().enumerate() {
        lines.push(format!(
            "  {}. Traffic: {:5.1} at {}",
            i + 1,
            r.traffic_score,
            coords(&r.position)
        ));
    }
    lines.push(String::new());
    lines.push(format!("TOP {} DANGER ZONES:", stats.top_hazard.len()));
    for (i, r) in stats.top_hazard.iter().enumerate() {
        lines.push(format!(
            "  {}. Danger: {:5.1} at {}",
            i + 1,
            r.hazard_score,
            coords(&r.position)
        ));
    }
    if stats.veteran_count > 0 {
        lines.push(String::new());
        lines.push(format!(
            "VETERAN NODES: {} nodes seen in multiple sessions",
            stats.veteran_count
        ));
        lines.push(format!("   Max sessions: {}", stats.max_sessions));
    }
    lines.push(String::new());
    lines.join("\n")
}

/// Returns `None` when nothing is stored for the map.
pub fn run(ctx: &AppContext, args: &StatsArgs) -> anyhow::Result<Option<MemoryStats>> {
    let store = open_store(&ctx.config.storage)?;
    let Some(set) = store.load(&args.map)? else {
        println!("nothing stored for {}", args.map);
        return Ok(None);
    };
    let stats = MemoryStats::compute(&set.nodes);
    print!("{}", format_stats(&args.map, &stats));
    Ok(Some(stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymem_core::models::WaypointRecord;

    #[test]
    fn report_lists_highways_and_veterans() {
        let records = vec![
            WaypointRecord::new(Position::new(0.0, 0.0, 0.0), 100.0, 0.0).with_observation_count(4),
            WaypointRecord::new(Position::new(64.0, 0.0, 0.0), 40.0, 100.0),
        ];
        let out = format_stats("dm4", &MemoryStats::compute(&records));
        assert!(out.starts_with("STATISTICS FOR DM4\n==================\n"));
        assert!(out.contains("  1. Traffic: 100.0 at (0.0, 0.0, 0.0)"));
        assert!(out.contains("  1. Danger: 100.0 at (64.0, 0.0, 0.0)"));
        assert!(out.contains("VETERAN NODES: 1 nodes seen in multiple sessions"));
        assert!(out.contains("   Max sessions: 4"));
    }

    #[test]
    fn report_omits_veterans_when_none() {
        let records = vec![WaypointRecord::new(Position::default(), 10.0, 0.0)];
        let out = format_stats("dm2", &MemoryStats::compute(&records));
        assert!(!out.contains("VETERAN"));
        assert!(out.contains("Traffic:  10.0"));
    }
}
