//! Seen-set tracking for deduplication

use ahash::AHashSet;
use std::hash::Hash;

/// Tracks keys seen so far in a single pass
pub struct DedupTracker<K> {
    seen: AHashSet<K>,
}

impl<K: Hash + Eq> DedupTracker<K> {
    /// Create a new deduplication tracker
    pub fn new() -> Self {
        Self {
            seen: AHashSet::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: AHashSet::with_capacity(capacity),
        }
    }

    /// Record a key and report whether it had been seen before.
    /// Returns true if this is a duplicate.
    pub fn is_duplicate(&mut self, key: K) -> bool {
        !self.seen.insert(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.seen.contains(key)
    }

    /// Get the number of unique keys seen
    pub fn unique_count(&self) -> usize {
        self.seen.len()
    }

    /// Clear all tracked keys
    pub fn clear(&mut self) {
        self.seen.clear();
    }
}

impl<K: Hash + Eq> Default for DedupTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}
