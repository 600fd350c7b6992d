//! # waymem-core
//!
//! Foundation crate for the waypoint memory system.
//! Defines records, errors, config, constants, and the store trait.
//! Every other crate in the workspace depends on this.

pub mod collections;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use collections::GroupIndex;
pub use config::WaymemConfig;
pub use errors::{WaymemError, WaymemResult};
pub use models::{EventRecord, MemoryStats, PersistedMemorySet, Position, WaypointRecord};
pub use traits::{IMemoryStore, Located};
