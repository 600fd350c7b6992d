use crate::errors::WaymemResult;
use crate::models::PersistedMemorySet;

/// Key-value persistence for memory sets, keyed by map identifier.
///
/// Sets are read in full and written in full. Implementations do not
/// serialize concurrent writers to the same map; that is the caller's job.
pub trait IMemoryStore: Send + Sync {
    /// Load the set stored for `map_id`, if any.
    fn load(&self, map_id: &str) -> WaymemResult<Option<PersistedMemorySet>>;

    /// Replace whatever is stored for `map_id` with `set`.
    fn save(&self, map_id: &str, set: &PersistedMemorySet) -> WaymemResult<()>;

    /// Identifiers of every stored map, sorted.
    fn list_maps(&self) -> WaymemResult<Vec<String>>;
}
