//! Read → deduplicate → write pipeline
//!
//! [`run`] performs one cleaning pass over a file. Progress is reported
//! through a [`CleanObserver`] so callers decide how (and whether) to
//! show it.

use crate::key::KeyColumns;
use crate::key_dedup::{deduplicate, DedupStats};
use crate::{Error, Result};
use medclean_formats::{open_table_with_config, save_table, CsvConfig, Table};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Input file used when none is configured
pub const DEFAULT_INPUT: &str = "medicine_data.csv";
/// Output file used when none is configured
pub const DEFAULT_OUTPUT: &str = "medicine_data_cleaned.csv";

/// Settings for one cleaning pass
#[derive(Debug, Clone)]
pub struct CleanConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub key_columns: KeyColumns,
    /// Reader settings. The same delimiter is used for output.
    pub csv: CsvConfig,
    /// Deduplicate and report without writing output
    pub dry_run: bool,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            key_columns: KeyColumns::default(),
            csv: CsvConfig::for_path(DEFAULT_INPUT),
            dry_run: false,
        }
    }
}

/// Outcome of a successful cleaning pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanReport {
    pub input: PathBuf,
    /// `None` for a dry run
    pub output: Option<PathBuf>,
    pub key_columns: KeyColumns,
    pub initial_rows: usize,
    pub final_rows: usize,
    pub rows_removed: usize,
}

impl CleanReport {
    /// Share of input rows removed, as a percentage
    pub fn removal_rate(&self) -> f64 {
        if self.initial_rows == 0 {
            0.0
        } else {
            (self.rows_removed as f64 / self.initial_rows as f64) * 100.0
        }
    }
}

/// Hooks called as a cleaning pass moves through its stages
#[allow(unused_variables)]
pub trait CleanObserver {
    fn started(&mut self, config: &CleanConfig) {}
    fn reading(&mut self, input: &Path) {}
    fn read(&mut self, rows: usize) {}
    fn deduplicating(&mut self, key: &KeyColumns) {}
    fn deduplicated(&mut self, stats: &DedupStats) {}
    fn writing(&mut self, output: &Path) {}
    fn finished(&mut self, report: &CleanReport) {}
}

/// Observer that ignores every event
#[derive(Debug, Default)]
pub struct SilentObserver;

impl CleanObserver for SilentObserver {}

/// Run one cleaning pass: read the input, drop duplicate keys, write the output.
///
/// Nothing is written when the input is missing, unreadable, or lacks a key
/// column. A write failure may leave a partial output file behind.
pub fn run<O: CleanObserver + ?Sized>(config: &CleanConfig, observer: &mut O) -> Result<CleanReport> {
    observer.started(config);

    if !config.input.is_file() {
        return Err(Error::InputNotFound(config.input.clone()));
    }

    observer.reading(&config.input);
    let table = load(&config.input, &config.csv)?;
    let initial_rows = table.len();
    observer.read(initial_rows);

    observer.deduplicating(&config.key_columns);
    let (cleaned, stats) = deduplicate(table, &config.key_columns)?;
    observer.deduplicated(&stats);

    let output = if config.dry_run {
        info!("Dry run: skipping write of {:?}", config.output);
        None
    } else {
        observer.writing(&config.output);
        store(&config.output, &cleaned, config.csv.delimiter)?;
        Some(config.output.clone())
    };

    let report = CleanReport {
        input: config.input.clone(),
        output,
        key_columns: config.key_columns.clone(),
        initial_rows,
        final_rows: cleaned.len(),
        rows_removed: initial_rows - cleaned.len(),
    };
    observer.finished(&report);

    Ok(report)
}

fn load(input: &Path, csv: &CsvConfig) -> Result<Table> {
    open_table_with_config(input, csv.clone()).map_err(Error::ParseError)
}

fn store(output: &Path, table: &Table, delimiter: u8) -> Result<()> {
    save_table(output, table, delimiter).map_err(|e| {
        warn!("Write to {:?} failed; output may be incomplete", output);
        Error::WriteError(e)
    })
}
