//! In-memory table of typed rows

use crate::cell::{Cell, ColumnType};

/// A single data row
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// One cell per header column
    pub cells: Vec<Cell>,
    /// Line of the source file the row started on (1-based, header is line 1)
    pub source_line: u64,
}

impl Row {
    /// Create a new row
    pub fn new(cells: Vec<Cell>, source_line: u64) -> Self {
        Self { cells, source_line }
    }

    /// Get the cell at a column index
    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }
}

/// A fully materialized table: header, per-column types and rows in file order
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    column_types: Vec<ColumnType>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table from parts. Every row must have one cell per header.
    pub fn new(headers: Vec<String>, column_types: Vec<ColumnType>, rows: Vec<Row>) -> Self {
        debug_assert_eq!(headers.len(), column_types.len());
        debug_assert!(rows.iter().all(|r| r.cells.len() == headers.len()));
        Self {
            headers,
            column_types,
            rows,
        }
    }

    /// Column names in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn column_types(&self) -> &[ColumnType] {
        &self.column_types
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Position of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Number of data rows (the header is not counted)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep only rows matching the predicate, preserving their relative order
    pub fn retain_rows<F>(&mut self, f: F)
    where
        F: FnMut(&Row) -> bool,
    {
        self.rows.retain(f);
    }
}
