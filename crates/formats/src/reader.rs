//! Unified table I/O entry points
//!
//! Picks compression and delimiter from the file name:
//! - `.gz` - gzip transport around the inner format (e.g. `data.csv.gz`)
//! - `.tsv` - tab-separated
//! - anything else - comma-separated

use crate::csv_reader::{CsvConfig, CsvReader};
use crate::csv_writer::CsvWriter;
use crate::{Result, Table};
use std::path::Path;
use tracing::info;

/// Transport compression implied by a file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
}

impl Compression {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gz") => Compression::Gzip,
            _ => Compression::None,
        }
    }
}

/// Delimiter implied by a file name, looking through a trailing `.gz`
pub fn delimiter_for_path<P: AsRef<Path>>(path: P) -> u8 {
    let path = path.as_ref();
    let inner = match Compression::from_path(path) {
        Compression::Gzip => path.file_stem().map(Path::new),
        Compression::None => Some(path),
    };

    match inner.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

/// Read a whole table with the settings implied by its file name
pub fn open_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let config = CsvConfig::for_path(&path);
    open_table_with_config(path, config)
}

/// Read a whole table with explicit settings
pub fn open_table_with_config<P: AsRef<Path>>(path: P, config: CsvConfig) -> Result<Table> {
    let path = path.as_ref();
    info!(
        "Opening table: {:?} (delimiter: {:?}, compression: {:?})",
        path,
        config.delimiter as char,
        Compression::from_path(path)
    );
    CsvReader::open_with_config(path, config)?.read_table()
}

/// Write a whole table, creating or truncating the file
pub fn save_table<P: AsRef<Path>>(path: P, table: &Table, delimiter: u8) -> Result<()> {
    let path = path.as_ref();
    info!("Writing {} rows to {:?}", table.len(), path);
    let mut writer = CsvWriter::create_with_delimiter(path, delimiter)?;
    writer.write_table(table)?;
    writer.finish()
}
