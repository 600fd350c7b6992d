/// waymem system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Opening sentinel of a waypoint dump block in a session log.
pub const DUMP_START_MARKER: &str = "// ===== CUT HERE: START WAYPOINTS =====";

/// Closing sentinel of a waypoint dump block in a session log.
pub const DUMP_END_MARKER: &str = "// ===== CUT HERE: END WAYPOINTS =====";

/// Name of the point-spawn call serialized inside a dump block.
pub const SPAWN_CALL: &str = "SpawnSavedWaypoint";

/// Marker emitted by the game for every self-inflicted rocket damage event.
pub const ROCKET_JUMP_MARKER: &str = "PLAYER_RJ_DAMAGE";

/// Map name used when a log never announces which map was loaded.
pub const UNKNOWN_MAP: &str = "unknown";

/// Number of entries in each "top N" list of a statistics report.
pub const STATS_TOP_N: usize = 5;

/// Tolerance used when validating that blend weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;
