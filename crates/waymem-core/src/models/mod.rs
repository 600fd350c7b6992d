//! Records flowing through the pipeline.

mod event;
mod memory_set;
mod position;
mod stats;
pub mod timestamp;
mod waypoint;

pub use event::EventRecord;
pub use memory_set::PersistedMemorySet;
pub use position::Position;
pub use stats::MemoryStats;
pub use waypoint::WaypointRecord;
