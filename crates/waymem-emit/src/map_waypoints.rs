//! `LoadMapWaypoints_<map>`: the latest dump's calls, passed through with
//! their quoting repaired.

use std::sync::LazyLock;

use regex::Regex;

use waymem_scanner::SessionDump;

/// Doubled single quotes around a vector.
static DOUBLED_VECTOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"''(\s*[-+0-9.\s]+?)\s*''").unwrap());

/// Console dumps double the quotes around vectors and print an empty target
/// as `''`. The compiler wants `'x y z'` and `""`.
pub fn normalize_quotes(call: &str) -> String {
    DOUBLED_VECTOR_RE
        .replace_all(call, "'$1'")
        .replace(", '')", ", \"\")")
}

pub fn render_map_waypoints(dump: &SessionDump) -> String {
    let count = dump.expected_count.unwrap_or(dump.calls.len());
    let mut lines = vec![
        format!("// ===== {} WAYPOINTS =====", dump.map.to_uppercase()),
        format!("// Generated: {count} nodes from bot traffic analysis"),
        format!("// Avg Traffic Score: {:.1}", dump.avg_traffic.unwrap_or(0.0)),
        format!("// Avg Danger Scent: {:.1}", dump.avg_hazard.unwrap_or(0.0)),
        "// Format: SpawnSavedWaypoint(origin, traffic_score, danger_scent, target)".to_string(),
        String::new(),
        format!("void() LoadMapWaypoints_{} =", dump.map),
        "{".to_string(),
    ];
    lines.extend(
        dump.calls
            .iter()
            .map(|call| format!("    {};", normalize_quotes(call))),
    );
    lines.push("};".to_string());
    lines.push(String::new());
    lines.join("\n")
}
