//! Error types for table readers and writers

use thiserror::Error;

/// Table format errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid file: {0}")]
    InvalidFile(String),

    #[error("Row {line} has {found} fields, expected {expected}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
}

/// Result type alias for format operations
pub type Result<T> = std::result::Result<T, Error>;
