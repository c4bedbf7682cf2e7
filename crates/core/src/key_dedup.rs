//! Exact deduplication over key columns
//!
//! Walks rows in file order and keeps the first row carrying each key
//! tuple. Whole tuples are stored in the seen-set, so distinct keys can
//! never collide.

use crate::dedup::DedupTracker;
use crate::key::{KeyColumns, KeyIndices, KeyTuple};
use crate::Result;
use medclean_formats::{Row, Table};
use serde::Serialize;
use tracing::{debug, info};

/// Statistics for deduplication operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DedupStats {
    /// Total number of rows seen
    pub total_seen: usize,
    /// Number of duplicates found
    pub duplicates_found: usize,
    /// Number of unique rows
    pub unique_count: usize,
}

impl DedupStats {
    /// Get the deduplication rate as a percentage
    pub fn dedup_rate(&self) -> f64 {
        if self.total_seen == 0 {
            0.0
        } else {
            (self.duplicates_found as f64 / self.total_seen as f64) * 100.0
        }
    }
}

/// Key-column deduplicator for rows sharing one header
pub struct KeyDeduplicator {
    indices: KeyIndices,
    tracker: DedupTracker<KeyTuple>,
    stats: DedupStats,
}

impl KeyDeduplicator {
    /// Create a deduplicator for rows laid out by `headers`
    pub fn new(key: &KeyColumns, headers: &[String]) -> Result<Self> {
        Self::with_capacity(key, headers, 0)
    }

    pub fn with_capacity(key: &KeyColumns, headers: &[String], capacity: usize) -> Result<Self> {
        let indices = key.resolve(headers)?;
        debug!("Key columns [{}] resolved to {:?}", key, indices.as_slice());

        Ok(Self {
            indices,
            tracker: DedupTracker::with_capacity(capacity),
            stats: DedupStats::default(),
        })
    }

    /// Check if a row repeats the key of an earlier row.
    ///
    /// Returns `true` if this is a duplicate, `false` if it is the first
    /// occurrence (which is then remembered).
    pub fn is_duplicate(&mut self, row: &Row) -> bool {
        self.stats.total_seen += 1;

        if self.tracker.is_duplicate(self.indices.key_of(row)) {
            self.stats.duplicates_found += 1;
            true
        } else {
            self.stats.unique_count += 1;
            false
        }
    }

    /// Drop every row whose key was already seen, keeping first occurrences in order
    pub fn dedup_table(&mut self, mut table: Table) -> Table {
        table.retain_rows(|row| !self.is_duplicate(row));
        table
    }

    /// Get current statistics
    pub fn stats(&self) -> &DedupStats {
        &self.stats
    }

    /// Clear all seen keys and reset statistics
    pub fn clear(&mut self) {
        self.tracker.clear();
        self.stats = DedupStats::default();
    }
}

/// Deduplicate a table on the given key columns
pub fn deduplicate(table: Table, key: &KeyColumns) -> Result<(Table, DedupStats)> {
    let mut dedup = KeyDeduplicator::with_capacity(key, table.headers(), table.len())?;
    let cleaned = dedup.dedup_table(table);
    let stats = dedup.stats().clone();

    info!(
        "Deduplicated on [{}]: {} rows in, {} duplicates removed ({:.1}%)",
        key,
        stats.total_seen,
        stats.duplicates_found,
        stats.dedup_rate()
    );

    Ok((cleaned, stats))
}
