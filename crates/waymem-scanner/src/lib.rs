//! # waymem-scanner
//!
//! Turns raw session-log text into records.
//! `session` finds sentinel-delimited waypoint dumps and parses their spawn calls;
//! `rocket_jump` parses self-damage markers and validates which jumps worked.

pub mod log;
pub mod rocket_jump;
pub mod session;
pub mod vector;

pub use rocket_jump::{JumpVerdict, RocketJump, RocketJumpScan, RocketJumpScanner};
pub use session::{MalformedEntry, SessionDump, SessionScanner};
pub use vector::parse_vector;
