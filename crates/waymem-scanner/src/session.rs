//! Sentinel-delimited waypoint dumps.
//!
//! The game prints its waypoint table between two marker lines. A log may
//! hold many dumps; the last complete one is the most recent session, and
//! each dump belongs to the map named by the nearest `SpawnServer:` line
//! above it.

use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};

use waymem_core::collections::GroupIndex;
use waymem_core::constants::{DUMP_END_MARKER, DUMP_START_MARKER, SPAWN_CALL, UNKNOWN_MAP};
use waymem_core::errors::ScanError;
use waymem_core::models::WaypointRecord;

use crate::log::read_log;
use crate::vector::{parse_vector, NUMBER};

/// Any spawn call, well-formed or not.
static CALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"{SPAWN_CALL}\s*\([^)]*\)")).unwrap());

/// A well-formed call: quoted vector (single or doubled quotes), two numbers,
/// optional trailing argument.
static STRICT_CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^{SPAWN_CALL}\s*\(\s*'+([^']*)'+\s*,\s*({NUMBER})\s*,\s*({NUMBER})\s*(?:,[^)]*)?\)$"
    ))
    .unwrap()
});

static TOTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//\s*Total Nodes:\s*(\d+)").unwrap());

static AVG_TRAFFIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//\s*Avg Traffic Score:\s*([-+]?[\d.]+)").unwrap());

static AVG_HAZARD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//\s*Avg Danger Scent:\s*([-+]?[\d.]+)").unwrap());

pub(crate) static SERVER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SpawnServer:\s*(\w+)").unwrap());

/// Map named by the last `SpawnServer:` line that starts before `offset`.
pub(crate) fn map_before(text: &str, offset: usize) -> String {
    SERVER_RE
        .captures_iter(&text[..offset])
        .last()
        .and_then(|caps| caps.get(1))
        .map_or_else(|| UNKNOWN_MAP.to_string(), |m| m.as_str().to_string())
}

/// A spawn call that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MalformedEntry {
    pub raw: String,
    pub reason: String,
}

/// One parsed dump block.
#[derive(Debug, Clone, Serialize)]
pub struct SessionDump {
    pub map: String,
    pub records: Vec<WaypointRecord>,
    /// Source text of every well-formed call, in dump order.
    pub calls: Vec<String>,
    /// `// Total Nodes:` footer, when present.
    pub expected_count: Option<usize>,
    pub avg_traffic: Option<f64>,
    pub avg_hazard: Option<f64>,
    pub malformed: Vec<MalformedEntry>,
}

impl SessionDump {
    /// `(expected, parsed)` when the footer disagrees with what was parsed.
    pub fn count_mismatch(&self) -> Option<(usize, usize)> {
        self.expected_count
            .filter(|&expected| expected != self.records.len())
            .map(|expected| (expected, self.records.len()))
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A complete block located in the text.
struct RawBlock<'a> {
    start: usize,
    body: &'a str,
}

fn find_blocks(text: &str) -> Vec<RawBlock<'_>> {
    let mut blocks = Vec::new();
    let mut cursor = 0;
    while let Some(rel) = text[cursor..].find(DUMP_START_MARKER) {
        let mut start = cursor + rel;
        let body_start = start + DUMP_START_MARKER.len();
        let Some(rel_end) = text[body_start..].find(DUMP_END_MARKER) else {
            break;
        };
        let body_end = body_start + rel_end;
        let mut body = &text[body_start..body_end];
        // An unterminated dump followed by a complete one: keep the later start.
        if let Some(inner) = body.rfind(DUMP_START_MARKER) {
            start = body_start + inner;
            body = &body[inner + DUMP_START_MARKER.len()..];
        }
        blocks.push(RawBlock { start, body });
        cursor = body_end + DUMP_END_MARKER.len();
    }
    blocks
}

fn capture_f64(re: &Regex, body: &str) -> Option<f64> {
    re.captures(body)?.get(1)?.as_str().parse().ok()
}

/// Extracts [`SessionDump`]s from console text.
#[derive(Debug, Clone, Default)]
pub struct SessionScanner {
    observed_at: Option<DateTime<Utc>>,
}

impl SessionScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp parsed records with `at` instead of the wall clock.
    pub fn observed_at(mut self, at: DateTime<Utc>) -> Self {
        self.observed_at = Some(at);
        self
    }

    /// Every complete dump in `text`, oldest first.
    pub fn scan_all(&self, text: &str) -> Vec<SessionDump> {
        let now = self.observed_at.unwrap_or_else(Utc::now);
        find_blocks(text)
            .into_iter()
            .map(|block| self.parse_block(map_before(text, block.start), block.body, now))
            .collect()
    }

    /// The most recent complete dump.
    pub fn scan(&self, text: &str, source_name: &str) -> Result<SessionDump, ScanError> {
        let dump = self
            .scan_all(text)
            .pop()
            .ok_or_else(|| ScanError::NoDumpFound {
                source_name: source_name.to_string(),
            })?;
        info!(
            source = source_name,
            map = %dump.map,
            records = dump.records.len(),
            malformed = dump.malformed.len(),
            "scanned latest waypoint dump"
        );
        Ok(dump)
    }

    /// The latest dump of each map, maps in order of first appearance.
    pub fn scan_by_map(&self, text: &str, source_name: &str) -> Result<Vec<SessionDump>, ScanError> {
        let mut by_map: GroupIndex<String, SessionDump> = GroupIndex::new();
        for dump in self.scan_all(text) {
            by_map.push(dump.map.clone(), dump);
        }
        if by_map.is_empty() {
            return Err(ScanError::NoDumpFound {
                source_name: source_name.to_string(),
            });
        }
        info!(source = source_name, maps = by_map.len(), "grouped dumps by map");
        Ok(by_map
            .into_groups()
            .into_iter()
            .filter_map(|(_, mut dumps)| dumps.pop())
            .collect())
    }

    pub fn scan_file(&self, path: &Path) -> Result<SessionDump, ScanError> {
        let text = read_log(path)?;
        self.scan(&text, &path.display().to_string())
    }

    pub fn scan_file_by_map(&self, path: &Path) -> Result<Vec<SessionDump>, ScanError> {
        let text = read_log(path)?;
        self.scan_by_map(&text, &path.display().to_string())
    }

    fn parse_block(&self, map: String, body: &str, now: DateTime<Utc>) -> SessionDump {
        let mut records = Vec::new();
        let mut calls = Vec::new();
        let mut malformed = Vec::new();

        for call in CALL_RE.find_iter(body) {
            let raw = call.as_str();
            match parse_call(raw, now) {
                Ok(record) => {
                    records.push(record);
                    calls.push(raw.to_string());
                }
                Err(ScanError::MalformedRecord { raw, reason }) => {
                    warn!(map = %map, raw = %raw, reason = %reason, "skipping malformed waypoint");
                    malformed.push(MalformedEntry { raw, reason });
                }
                Err(other) => {
                    warn!(map = %map, error = %other, "skipping waypoint");
                    malformed.push(MalformedEntry {
                        raw: raw.to_string(),
                        reason: other.to_string(),
                    });
                }
            }
        }

        let expected_count = TOTAL_RE
            .captures(body)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok());

        let dump = SessionDump {
            map,
            records,
            calls,
            expected_count,
            avg_traffic: capture_f64(&AVG_TRAFFIC_RE, body),
            avg_hazard: capture_f64(&AVG_HAZARD_RE, body),
            malformed,
        };

        if let Some((expected, parsed)) = dump.count_mismatch() {
            warn!(map = %dump.map, expected, parsed, "dump footer disagrees with parsed count");
        }
        debug!(map = %dump.map, records = dump.records.len(), "parsed dump block");
        dump
    }
}

/// Parse one `SpawnSavedWaypoint(...)` call.
fn parse_call(raw: &str, now: DateTime<Utc>) -> Result<WaypointRecord, ScanError> {
    let malformed = |reason: &str| ScanError::MalformedRecord {
        raw: raw.to_string(),
        reason: reason.to_string(),
    };
    let caps = STRICT_CALL_RE
        .captures(raw)
        .ok_or_else(|| malformed("unrecognised call shape"))?;

    let position = parse_vector(&caps[1]).map_err(|e| match e {
        ScanError::MalformedRecord { reason, .. } => ScanError::MalformedRecord {
            raw: raw.to_string(),
            reason,
        },
        other => other,
    })?;
    let traffic: f64 = caps[2].parse().map_err(|_| malformed("bad traffic score"))?;
    let hazard: f64 = caps[3].parse().map_err(|_| malformed("bad hazard score"))?;
    if !traffic.is_finite() {
        return Err(malformed("traffic score out of range"));
    }
    if !hazard.is_finite() {
        return Err(malformed("hazard score out of range"));
    }

    Ok(WaypointRecord::observed_at(position, traffic, hazard, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymem_core::models::Position;

    fn scanner() -> SessionScanner {
        SessionScanner::new().observed_at(Utc::now())
    }

    #[test]
    fn doubled_quotes_and_extra_argument_parse() {
        let r = parse_call("SpawnSavedWaypoint(''544.2 -128 24'', 42.5, 3.25, '')", Utc::now()).unwrap();
        assert_eq!(r.position, Position::new(544.2, -128.0, 24.0));
        assert_eq!(r.traffic_score, 42.5);
        assert_eq!(r.hazard_score, 3.25);
    }

    #[test]
    fn overflowing_score_is_malformed() {
        let huge = "9".repeat(400);
        let raw = format!("SpawnSavedWaypoint('1 2 3', {huge}, 0)");
        let err = parse_call(&raw, Utc::now()).unwrap_err();
        assert!(matches!(err, ScanError::MalformedRecord { .. }));
    }

    #[test]
    fn two_component_vector_is_malformed() {
        let err = parse_call("SpawnSavedWaypoint('12 34', 9, 9)", Utc::now()).unwrap_err();
        match err {
            ScanError::MalformedRecord { raw, .. } => assert!(raw.contains("'12 34'")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unterminated_block_is_ignored() {
        let text = format!("{DUMP_START_MARKER}\nSpawnSavedWaypoint('1 2 3', 1, 1);\n");
        assert!(scanner().scan_all(&text).is_empty());
        assert!(matches!(
            scanner().scan(&text, "log"),
            Err(ScanError::NoDumpFound { .. })
        ));
    }

    #[test]
    fn restarted_dump_keeps_the_later_start() {
        let text = format!(
            "SpawnServer: e1m1\n{DUMP_START_MARKER}\nSpawnSavedWaypoint('9 9 9', 1, 1);\n\
             SpawnServer: dm6\n{DUMP_START_MARKER}\nSpawnSavedWaypoint('1 2 3', 8, 0);\n{DUMP_END_MARKER}\n"
        );
        let dumps = scanner().scan_all(&text);
        assert_eq!(dumps.len(), 1);
        assert_eq!(dumps[0].map, "dm6");
        assert_eq!(dumps[0].records.len(), 1);
    }

    #[test]
    fn block_without_server_line_is_unknown_map() {
        let text = format!("{DUMP_START_MARKER}\nSpawnSavedWaypoint('1 2 3', 8, 0);\n{DUMP_END_MARKER}");
        assert_eq!(scanner().scan(&text, "log").unwrap().map, UNKNOWN_MAP);
    }

    #[test]
    fn footer_mismatch_is_reported_not_fatal() {
        let text = format!(
            "{DUMP_START_MARKER}\nSpawnSavedWaypoint('1 2 3', 8, 0);\n// Total Nodes: 3\n{DUMP_END_MARKER}"
        );
        let dump = scanner().scan(&text, "log").unwrap();
        assert_eq!(dump.count_mismatch(), Some((3, 1)));
    }
}
