//! `Load<MAP>Memory`: the consolidated memory set as spawn calls.

use chrono::{DateTime, Utc};

use waymem_core::models::WaypointRecord;

/// One record as a spawn call, one decimal digit everywhere.
pub fn format_record(record: &WaypointRecord) -> String {
    let p = record.position;
    format!(
        "    SpawnSavedWaypoint('{:.1} {:.1} {:.1}', {:.1}, {:.1});",
        p.x, p.y, p.z, record.traffic_score, record.hazard_score
    )
}

fn average(records: &[WaypointRecord], field: impl Fn(&WaypointRecord) -> f64) -> f64 {
    if records.is_empty() {
        0.0
    } else {
        records.iter().map(field).sum::<f64>() / records.len() as f64
    }
}

/// Render the memory block for `map`, busiest records first. When there are
/// more than `high_traffic_segment` records the busiest ones get their own
/// commented segment.
pub fn render_memory(
    map: &str,
    records: &[WaypointRecord],
    generated_at: DateTime<Utc>,
    high_traffic_segment: usize,
) -> String {
    let mut sorted: Vec<&WaypointRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.traffic_score.total_cmp(&a.traffic_score));

    let mut lines = vec![
        "// ===== AUTO-GENERATED BOT MEMORY =====".to_string(),
        format!("// Map: {map}"),
        format!("// Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        format!("// Total Nodes: {}", records.len()),
        format!("// Avg Traffic: {:.1}", average(records, |r| r.traffic_score)),
        format!("// Avg Danger: {:.1}", average(records, |r| r.hazard_score)),
        "// Format: SpawnSavedWaypoint(origin, traffic_score, danger_scent)".to_string(),
        String::new(),
        format!("void() Load{}Memory =", map.to_uppercase()),
        "{".to_string(),
    ];

    if sorted.len() > high_traffic_segment {
        let (top, rest) = sorted.split_at(high_traffic_segment);
        lines.push(format!("    // === HIGH TRAFFIC ROUTES (Top {high_traffic_segment}) ==="));
        lines.extend(top.iter().map(|r| format_record(r)));
        lines.push(String::new());
        lines.push("    // === REMAINING NODES ===".to_string());
        lines.extend(rest.iter().map(|r| format_record(r)));
    } else {
        lines.extend(sorted.iter().map(|r| format_record(r)));
    }

    lines.push("};".to_string());
    lines.push("// ===== END AUTO-GENERATED =====".to_string());
    lines.push(String::new());
    lines.join("\n")
}
