//! Error types for the cleaning pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Cleaning errors, one variant per failure stage
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input file '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to read input: {0}")]
    ParseError(#[source] medclean_formats::Error),

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Failed to write output: {0}")]
    WriteError(#[source] medclean_formats::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
