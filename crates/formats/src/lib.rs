//! Table formats for medicine record cleaning
//!
//! This crate reads delimited text files into typed in-memory tables and
//! writes them back out, with optional gzip transport.

pub mod cell;
pub mod csv_reader;
pub mod csv_writer;
pub mod error;
pub mod reader;
pub mod table;

pub use cell::{Cell, ColumnType, NaValues, Number};
pub use csv_reader::{CsvConfig, CsvReader};
pub use csv_writer::CsvWriter;
pub use error::{Error, Result};
pub use reader::{delimiter_for_path, open_table, open_table_with_config, save_table, Compression};
pub use table::{Row, Table};
