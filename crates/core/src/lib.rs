//! Core deduplication logic for medicine record cleaning
//!
//! This crate resolves key columns against a table header, removes rows
//! whose key tuple repeats an earlier row, and drives the
//! read → deduplicate → write pass over a file.

pub mod dedup;
pub mod error;
pub mod key;
pub mod key_dedup;
pub mod pipeline;

pub use error::{Error, Result};
pub use key::{KeyColumns, KeyIndices, KeyTuple, DEFAULT_KEY_COLUMNS};
pub use key_dedup::{deduplicate, DedupStats, KeyDeduplicator};
pub use pipeline::{run, CleanConfig, CleanObserver, CleanReport, SilentObserver};
