// mariage-core/src/domain/keys.rs

use std::collections::HashMap;
use std::hash::Hash;

/// Synthetic integer identifier of a dimension row. Starts at 1.
pub type SurrogateKey = u32;

/// Hands out surrogate keys to natural keys in first-seen order.
///
/// Each builder owns its own assigner; ids are dense (1..=N), strictly increasing,
/// and never reused within a run.
#[derive(Debug, Clone)]
pub struct KeyAssigner<K> {
    next_id: SurrogateKey,
    lookup: HashMap<K, SurrogateKey>,
}

impl<K: Eq + Hash> Default for KeyAssigner<K> {
    fn default() -> Self {
        Self {
            next_id: 1,
            lookup: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> KeyAssigner<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `key` and whether it was freshly assigned.
    pub fn assign(&mut self, key: &K) -> (SurrogateKey, bool) {
        if let Some(id) = self.lookup.get(key) {
            return (*id, false);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.lookup.insert(key.clone(), id);
        (id, true)
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    pub fn into_lookup(self) -> HashMap<K, SurrogateKey> {
        self.lookup
    }
}
