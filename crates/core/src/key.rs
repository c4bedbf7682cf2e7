//! Key columns and key tuples
//!
//! Two rows are duplicates when the cells at every key column are equal.
//! Missing values compare equal to each other.

use crate::{Error, Result};
use medclean_formats::{Cell, Row};
use serde::{Deserialize, Serialize};

/// Key columns used when none are configured
pub const DEFAULT_KEY_COLUMNS: [&str; 3] = ["product_name", "salt_composition", "product_manufactured"];

/// Ordered list of column names forming the duplicate key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyColumns(Vec<String>);

impl KeyColumns {
    /// Create a key from column names. Names must be non-empty and distinct.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if names.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one key column is required".to_string(),
            ));
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(Error::InvalidConfig(format!(
                    "key column '{}' is listed more than once",
                    name
                )));
            }
        }

        Ok(Self(names))
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Map each key column to its position in `headers`.
    ///
    /// Fails with a schema error naming every key column the header lacks.
    pub fn resolve(&self, headers: &[String]) -> Result<KeyIndices> {
        let mut indices = Vec::with_capacity(self.0.len());
        let mut missing = Vec::new();

        for name in &self.0 {
            match headers.iter().position(|h| h == name) {
                Some(i) => indices.push(i),
                None => missing.push(name.as_str()),
            }
        }

        if !missing.is_empty() {
            return Err(Error::SchemaError(format!(
                "key column(s) {} not found in header [{}]",
                missing.join(", "),
                headers.join(", ")
            )));
        }

        Ok(KeyIndices(indices))
    }
}

impl Default for KeyColumns {
    fn default() -> Self {
        Self(DEFAULT_KEY_COLUMNS.iter().map(|s| s.to_string()).collect())
    }
}

impl std::fmt::Display for KeyColumns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// Key column positions resolved against a particular header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyIndices(Vec<usize>);

impl KeyIndices {
    /// Project a row onto its key tuple
    pub fn key_of(&self, row: &Row) -> KeyTuple {
        KeyTuple(
            self.0
                .iter()
                .map(|&i| row.get(i).cloned().unwrap_or(Cell::Missing))
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// Ordered key cells of one row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyTuple(Vec<Cell>);

impl KeyTuple {
    pub fn cells(&self) -> &[Cell] {
        &self.0
    }
}
