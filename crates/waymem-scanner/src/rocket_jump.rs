//! Rocket-jump markers and their success validation.
//!
//! The game logs one marker per self-inflicted rocket hit. A hit only counts
//! as a usable jump when it launched the player upward fast enough, was
//! fired while looking down, and the player did not die right after.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use waymem_core::config::defaults::{
    DEFAULT_MIN_UPWARD_VELOCITY, DEFAULT_PITCH_MAX, DEFAULT_PITCH_MIN,
    DEFAULT_SURVIVAL_WINDOW_SECS,
};
use waymem_core::config::ClusterConfig;
use waymem_core::constants::{ROCKET_JUMP_MARKER, UNKNOWN_MAP};
use waymem_core::errors::ScanError;
use waymem_core::models::{EventRecord, Position};

use crate::log::read_log;
use crate::session::map_before;
use crate::vector::{parse_vector, NUMBER};

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    let vector = r"'?([-+0-9.eE \t]+?)'?";
    Regex::new(&format!(
        r"{ROCKET_JUMP_MARKER}:\s*{vector}\s*\|\s*dmg=\s*({NUMBER})\s*\|\s*vel=\s*{vector}\s*\|\s*ang=\s*{vector}\s*\|\s*time=\s*({NUMBER})"
    ))
    .unwrap()
});

static DEATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+\.\d+).*?(?:died|killed|suicide)").unwrap());

/// Everything the marker recorded about one jump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocketJump {
    pub origin: Position,
    pub damage: f64,
    pub velocity: Position,
    /// Pitch, yaw, roll in degrees.
    pub angles: Position,
    /// Game time in seconds.
    pub timestamp: f64,
}

impl RocketJump {
    /// Rough apex gain above the origin.
    pub fn height_gain(&self) -> f64 {
        self.velocity.z / 10.0
    }

    pub fn pitch(&self) -> f64 {
        self.angles.x
    }
}

/// Why a jump was or was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpVerdict {
    Success,
    TooSlow,
    BadPitch,
    DiedAfter,
}

/// Result of scanning one log for rocket jumps.
#[derive(Debug, Clone, Serialize)]
pub struct RocketJumpScan {
    pub map: String,
    pub attempts: usize,
    pub deaths: usize,
    pub malformed: usize,
    /// Successful jumps, scored by upward velocity.
    pub successful: Vec<EventRecord<RocketJump>>,
}

impl RocketJumpScan {
    pub fn success_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.successful.len() as f64 / self.attempts as f64
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocketJumpScanner {
    min_upward_velocity: f64,
    pitch_min: f64,
    pitch_max: f64,
    survival_window_secs: f64,
}

impl Default for RocketJumpScanner {
    fn default() -> Self {
        Self {
            min_upward_velocity: DEFAULT_MIN_UPWARD_VELOCITY,
            pitch_min: DEFAULT_PITCH_MIN,
            pitch_max: DEFAULT_PITCH_MAX,
            survival_window_secs: DEFAULT_SURVIVAL_WINDOW_SECS,
        }
    }
}

impl RocketJumpScanner {
    pub fn from_config(config: &ClusterConfig) -> Self {
        Self {
            min_upward_velocity: config.min_upward_velocity,
            pitch_min: config.pitch_min,
            pitch_max: config.pitch_max,
            survival_window_secs: config.survival_window_secs,
        }
    }

    pub fn judge(&self, jump: &RocketJump, deaths: &[f64]) -> JumpVerdict {
        if jump.velocity.z <= self.min_upward_velocity {
            return JumpVerdict::TooSlow;
        }
        if !(self.pitch_min..=self.pitch_max).contains(&jump.pitch()) {
            return JumpVerdict::BadPitch;
        }
        let died = deaths.iter().any(|&death| {
            let dt = death - jump.timestamp;
            dt > 0.0 && dt < self.survival_window_secs
        });
        if died {
            JumpVerdict::DiedAfter
        } else {
            JumpVerdict::Success
        }
    }

    pub fn scan(&self, text: &str, source_name: &str) -> Result<RocketJumpScan, ScanError> {
        let deaths = death_times(text);
        let mut attempts = 0;
        let mut malformed = 0;
        let mut successful = Vec::new();
        let mut first_marker = None;

        for caps in MARKER_RE.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            first_marker.get_or_insert(whole.start());
            attempts += 1;

            let jump = match parse_marker(&caps) {
                Ok(jump) => jump,
                Err(e) => {
                    warn!(error = %e, "skipping malformed rocket jump marker");
                    malformed += 1;
                    continue;
                }
            };

            match self.judge(&jump, &deaths) {
                JumpVerdict::Success => {
                    successful.push(EventRecord::new(jump.origin, jump.velocity.z, jump));
                }
                verdict => debug!(time = jump.timestamp, ?verdict, "rejected rocket jump"),
            }
        }

        let Some(first_marker) = first_marker else {
            return Err(ScanError::NoEventsFound {
                source_name: source_name.to_string(),
            });
        };

        // Jumps belong to the last map loaded before the session started jumping.
        let map = match map_before(text, first_marker) {
            map if map == UNKNOWN_MAP => map_before(text, text.len()),
            map => map,
        };

        let scan = RocketJumpScan {
            map,
            attempts,
            deaths: deaths.len(),
            malformed,
            successful,
        };
        info!(
            source = source_name,
            map = %scan.map,
            attempts = scan.attempts,
            successful = scan.successful.len(),
            deaths = scan.deaths,
            "scanned rocket jumps"
        );
        Ok(scan)
    }

    pub fn scan_file(&self, path: &Path) -> Result<RocketJumpScan, ScanError> {
        let text = read_log(path)?;
        self.scan(&text, &path.display().to_string())
    }
}

/// Timestamps of every death line.
fn death_times(text: &str) -> Vec<f64> {
    text.lines()
        .filter_map(|line| DEATH_RE.captures(line))
        .filter_map(|caps| caps.get(1)?.as_str().parse().ok())
        .collect()
}

fn parse_marker(caps: &regex::Captures<'_>) -> Result<RocketJump, ScanError> {
    let number = |idx: usize| -> Result<f64, ScanError> {
        let raw = caps.get(idx).map_or("", |m| m.as_str());
        raw.parse().map_err(|_| ScanError::MalformedRecord {
            raw: raw.to_string(),
            reason: "not a number".to_string(),
        })
    };
    Ok(RocketJump {
        origin: parse_vector(caps.get(1).map_or("", |m| m.as_str()))?,
        damage: number(2)?,
        velocity: parse_vector(caps.get(3).map_or("", |m| m.as_str()))?,
        angles: parse_vector(caps.get(4).map_or("", |m| m.as_str()))?,
        timestamp: number(5)?,
    })
}
