//! Renderer output against the sample logs and fixed timestamps.

use test_fixtures::{fixed_time, waypoint, waypoint_line, ROCKET_JUMP_LOG, SESSION_LOG};
use waymem_consolidation::ProximityClusterer;
use waymem_emit::{
    map_waypoints_file_name, memory_file_name, render_map_waypoints, render_memory,
    render_rocket_jumps, write_output,
};
use waymem_scanner::{RocketJumpScanner, SessionScanner};

#[test]
fn memory_block_is_reproducible_and_sorted() {
    let records = vec![
        waypoint(0.0, 0.0, 0.0, 20.0, 0.0),
        waypoint(64.0, 0.0, 0.0, 100.0, 50.0),
    ];
    let out = render_memory("dm4", &records, fixed_time(), 10);
    assert_eq!(out, render_memory("dm4", &records, fixed_time(), 10));

    let expected = "\
// ===== AUTO-GENERATED BOT MEMORY =====
// Map: dm4
// Generated: 2025-01-03 10:41:02
// Total Nodes: 2
// Avg Traffic: 60.0
// Avg Danger: 25.0
// Format: SpawnSavedWaypoint(origin, traffic_score, danger_scent)

void() LoadDM4Memory =
{
    SpawnSavedWaypoint('64.0 0.0 0.0', 100.0, 50.0);
    SpawnSavedWaypoint('0.0 0.0 0.0', 20.0, 0.0);
};
// ===== END AUTO-GENERATED =====
";
    assert_eq!(out, expected);
}

#[test]
fn large_sets_get_a_high_traffic_segment() {
    let records = waypoint_line(12, 64.0);
    let out = render_memory("e1m1", &records, fixed_time(), 10);
    let top = out.find("HIGH TRAFFIC ROUTES (Top 10)").unwrap();
    let rest = out.find("=== REMAINING NODES ===").unwrap();
    assert!(top < rest);
    // The two quietest records (traffic 5 and 6) land after the split.
    let tail = &out[rest..];
    assert!(tail.contains("SpawnSavedWaypoint('64.0 0.0 0.0', 6.0"));
    assert!(tail.contains("SpawnSavedWaypoint('0.0 0.0 0.0', 5.0"));
    assert_eq!(tail.matches("SpawnSavedWaypoint(").count(), 2);
}

#[test]
fn map_waypoint_block_passes_through_fixed_calls() {
    let dump = SessionScanner::new().scan(SESSION_LOG, "qconsole.log").unwrap();
    let out = render_map_waypoints(&dump);
    assert!(out.contains("void() LoadMapWaypoints_dm4 ="));
    assert!(out.contains("// Generated: 5 nodes from bot traffic analysis"));
    assert!(out.contains("    SpawnSavedWaypoint('544.2 -128 24', 42.5, 3.25, \"\");"));
    assert!(out.contains("    SpawnSavedWaypoint('1000 1000 64', 0, 6, \"door1\");"));
    assert!(!out.contains("''"));
    assert!(!out.contains("'12 34'"));
}

#[test]
fn rocket_jump_block_lists_representatives() {
    let scan = RocketJumpScanner::default().scan(ROCKET_JUMP_LOG, "rj.log").unwrap();
    let reps = ProximityClusterer::default().cluster(scan.successful);
    assert_eq!(reps.len(), 2);

    let out = render_rocket_jumps(&scan.map, &reps);
    assert!(out.contains("void() LoadPlayerLearnedRJ_dm2 ="));
    assert!(out.contains("// Generated: 2 validated RJ techniques"));
    assert!(out.contains("    // RJ #1: vel_gain=520.0 u/s, height~52u"));
    assert!(out.contains(
        "    SpawnLearnedRJ('110.0 205.0 50.0', '-70.0 90.0 0.0', 520.0, \"rj_vertical\");"
    ));
    assert!(out.contains("    // RJ #2: vel_gain=380.0 u/s, height~38u"));
    assert!(out.ends_with("};\n"));
}

#[test]
fn empty_rocket_jump_set_renders_a_comment() {
    assert_eq!(
        render_rocket_jumps("dm2", &[]),
        "// No successful rocket jumps detected\n"
    );
}

#[test]
fn write_output_creates_the_directory() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("maps");
    let path = write_output(&target, &memory_file_name("dm4"), "// test\n").unwrap();
    assert_eq!(path, target.join("dm4_memory.qc"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), "// test\n");
    assert_eq!(map_waypoints_file_name("dm4"), "dm4_waypoints.qc");
}
