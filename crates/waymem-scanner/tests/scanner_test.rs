//! Scanner behavior against the shared sample logs.

use test_fixtures::{fixed_time, NO_DUMP_LOG, ROCKET_JUMP_LOG, SESSION_LOG};
use waymem_core::errors::ScanError;
use waymem_core::models::Position;
use waymem_scanner::{RocketJumpScanner, SessionScanner};

fn scanner() -> SessionScanner {
    SessionScanner::new().observed_at(fixed_time())
}

#[test]
fn latest_dump_is_the_dm4_block() {
    let dump = scanner().scan(SESSION_LOG, "qconsole.log").unwrap();
    assert_eq!(dump.map, "dm4");
    assert_eq!(dump.records.len(), 4);
    assert_eq!(dump.malformed.len(), 1);
    assert!(dump.malformed[0].raw.contains("'12 34'"));
    assert_eq!(dump.expected_count, Some(5));
    assert_eq!(dump.count_mismatch(), Some((5, 4)));
    assert_eq!(dump.avg_traffic, Some(13.8));
    assert_eq!(dump.avg_hazard, Some(1.9));
}

#[test]
fn dump_records_keep_order_and_values() {
    let dump = scanner().scan(SESSION_LOG, "qconsole.log").unwrap();
    let positions: Vec<Position> = dump.records.iter().map(|r| r.position).collect();
    assert_eq!(
        positions,
        vec![
            Position::new(0.0, 0.0, 0.0),
            Position::new(544.2, -128.0, 24.0),
            Position::new(-320.0, 96.5, -16.0),
            Position::new(1000.0, 1000.0, 64.0),
        ]
    );
    assert_eq!(dump.records[1].traffic_score, 42.5);
    assert_eq!(dump.records[3].hazard_score, 6.0);
    assert!(dump.records.iter().all(|r| r.observation_count == 1));
    assert!(dump.records.iter().all(|r| r.last_updated == fixed_time()));
    assert_eq!(dump.calls.len(), 4);
}

#[test]
fn scan_by_map_returns_one_dump_per_map() {
    let dumps = scanner().scan_by_map(SESSION_LOG, "qconsole.log").unwrap();
    let maps: Vec<&str> = dumps.iter().map(|d| d.map.as_str()).collect();
    assert_eq!(maps, vec!["dm3", "dm4"]);
    assert_eq!(dumps[0].records.len(), 2);
    assert_eq!(dumps[0].count_mismatch(), None);
}

#[test]
fn overflowing_score_is_skipped_not_fatal() {
    let huge = "9".repeat(400);
    let log = format!(
        "SpawnServer: dm4\n\
         // ===== CUT HERE: START WAYPOINTS =====\n\
         SpawnSavedWaypoint('1 2 3', {huge}, 0);\n\
         SpawnSavedWaypoint('500 0 0', 50.0, 0.0);\n\
         // ===== CUT HERE: END WAYPOINTS =====\n"
    );
    let dump = scanner().scan(&log, "qconsole.log").unwrap();
    assert_eq!(dump.records.len(), 1);
    assert_eq!(dump.records[0].traffic_score, 50.0);
    assert_eq!(dump.malformed.len(), 1);
    assert!(dump.records.iter().all(|r| r.traffic_score.is_finite()));
}

#[test]
fn unterminated_dump_is_missing_input() {
    let err = scanner().scan(NO_DUMP_LOG, "no_dump.log").unwrap_err();
    assert!(matches!(err, ScanError::NoDumpFound { .. }));
    assert!(err.is_missing_input());
}

#[test]
fn missing_file_is_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let err = scanner().scan_file(&dir.path().join("absent.log")).unwrap_err();
    assert!(matches!(err, ScanError::LogNotFound { .. }));
}

#[test]
fn scan_file_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("qconsole.log");
    std::fs::write(&path, SESSION_LOG).unwrap();
    assert_eq!(scanner().scan_file(&path).unwrap().map, "dm4");
    assert_eq!(scanner().scan_file_by_map(&path).unwrap().len(), 2);
}

#[test]
fn rocket_jump_log_yields_three_successes() {
    let scan = RocketJumpScanner::default().scan(ROCKET_JUMP_LOG, "rj.log").unwrap();
    assert_eq!(scan.map, "dm2");
    assert_eq!(scan.attempts, 6);
    assert_eq!(scan.deaths, 1);
    assert_eq!(scan.malformed, 0);
    let times: Vec<f64> = scan.successful.iter().map(|e| e.meta.timestamp).collect();
    assert_eq!(times, vec![10.5, 20.0, 30.25]);
    assert_eq!(scan.successful[1].score, 520.0);
    assert_eq!(scan.successful[2].meta.angles, Position::new(-45.0, 0.0, 0.0));
    assert!((scan.success_rate() - 0.5).abs() < 1e-12);
}
