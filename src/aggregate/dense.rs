//! Sparse tallies read back as dense, zero-filled grids.

use std::collections::HashMap;
use std::hash::Hash;

/// Occurrence counter over composite keys.
///
/// Accumulation is sparse, but reads default to zero, so a view can walk the
/// full month × category cartesian grid and emit an explicit `0` for every
/// combination that never occurred. All the month-sliced views share this
/// instead of growing their own ad-hoc maps.
#[derive(Debug)]
pub struct Tally<K> {
    counts: HashMap<K, u64>,
}

impl<K: Eq + Hash> Tally<K> {
    pub fn new() -> Tally<K> {
        Tally {
            counts: HashMap::new(),
        }
    }

    /// Counts one occurrence of `key`.
    pub fn add(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// The count for `key`, zero when it never occurred.
    pub fn get(&self, key: &K) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Sum over every recorded key.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl<K: Eq + Hash> Default for Tally<K> {
    fn default() -> Tally<K> {
        Tally::new()
    }
}
