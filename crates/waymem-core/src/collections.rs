//! Key to append-only sequence container.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Maps a discrete key to an ordered, append-only sequence of values.
///
/// Looking up a key that was never pushed yields an empty slice. Keys iterate
/// in first-insertion order, so grouping is deterministic.
#[derive(Debug, Clone)]
pub struct GroupIndex<K, V> {
    slots: FxHashMap<K, usize>,
    groups: Vec<(K, Vec<V>)>,
}

impl<K, V> Default for GroupIndex<K, V> {
    fn default() -> Self {
        Self {
            slots: FxHashMap::default(),
            groups: Vec::new(),
        }
    }
}

impl<K: Hash + Eq + Clone, V> GroupIndex<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to the sequence for `key`, creating it on first use.
    pub fn push(&mut self, key: K, value: V) {
        self.entry(key).push(value);
    }

    /// Mutable access to the sequence for `key`, created empty if absent.
    pub fn entry(&mut self, key: K) -> &mut Vec<V> {
        let idx = match self.slots.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.groups.len();
                self.slots.insert(key.clone(), idx);
                self.groups.push((key, Vec::new()));
                idx
            }
        };
        &mut self.groups[idx].1
    }

    /// The sequence for `key`; empty when the key was never pushed.
    pub fn get(&self, key: &K) -> &[V] {
        self.slots
            .get(key)
            .map(|&idx| self.groups[idx].1.as_slice())
            .unwrap_or(&[])
    }

    /// Last value pushed under `key`.
    pub fn latest(&self, key: &K) -> Option<&V> {
        self.get(key).last()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn into_groups(self) -> Vec<(K, Vec<V>)> {
        self.groups
    }
}
