//! Delimited-text table reader
//!
//! Reads a header row and every data row into memory, then decides each
//! column's type in a second pass so a column is typed consistently across
//! the whole file.

use crate::cell::{ColumnType, NaValues};
use crate::reader::Compression;
use crate::table::{Row, Table};
use crate::{Error, Result};
use csv::StringRecord;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const UTF8_BOM: char = '\u{feff}';

/// Configuration for the CSV reader
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Field delimiter
    pub delimiter: u8,
    /// Tokens read as missing values
    pub na_values: NaValues,
    /// Buffer size for the underlying reader
    pub buffer_size: usize,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            na_values: NaValues::default(),
            buffer_size: 64 * 1024, // 64KB buffer
        }
    }
}

impl CsvConfig {
    /// Default configuration with the delimiter implied by the file name
    pub fn for_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            delimiter: crate::reader::delimiter_for_path(path),
            ..Self::default()
        }
    }
}

/// Reader that materializes a delimited file into a [`Table`]
pub struct CsvReader<R: Read> {
    reader: csv::Reader<R>,
    config: CsvConfig,
}

impl CsvReader<Box<dyn Read>> {
    /// Open a file with the configuration implied by its name
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = CsvConfig::for_path(&path);
        Self::open_with_config(path, config)
    }

    /// Open a file, decompressing gzip when the name ends in `.gz`
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: CsvConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let reader: Box<dyn Read> = match Compression::from_path(path) {
            Compression::Gzip => {
                debug!("Opening gzip-compressed table: {:?}", path);
                Box::new(GzDecoder::new(file))
            }
            Compression::None => {
                debug!("Opening plain table: {:?}", path);
                Box::new(file)
            }
        };

        Ok(Self::new_with_config(reader, config))
    }
}

impl<R: Read> CsvReader<R> {
    /// Create a reader over any Read source with default settings
    pub fn new(reader: R) -> Self {
        Self::new_with_config(reader, CsvConfig::default())
    }

    pub fn new_with_config(reader: R, config: CsvConfig) -> Self {
        let reader = csv::ReaderBuilder::new()
            .delimiter(config.delimiter)
            .has_headers(true)
            .flexible(true)
            .buffer_capacity(config.buffer_size)
            .from_reader(reader);
        Self { reader, config }
    }

    /// Read the whole source into a typed table
    pub fn read_table(mut self) -> Result<Table> {
        let headers: Vec<String> = self
            .reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if i == 0 {
                    h.trim_start_matches(UTF8_BOM).to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();

        if headers.is_empty() {
            return Err(Error::InvalidFile("no header row".to_string()));
        }

        let mut raw_rows: Vec<(u64, StringRecord)> = Vec::new();
        for result in self.reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            if record.len() != headers.len() {
                return Err(Error::RaggedRow {
                    line,
                    expected: headers.len(),
                    found: record.len(),
                });
            }
            raw_rows.push((line, record));
        }

        let na = &self.config.na_values;
        let column_types: Vec<ColumnType> = (0..headers.len())
            .map(|col| ColumnType::infer(raw_rows.iter().map(|(_, r)| &r[col]), na))
            .collect();

        debug!(
            "Read {} rows x {} columns, types: {:?}",
            raw_rows.len(),
            headers.len(),
            column_types
        );

        let rows = raw_rows
            .into_iter()
            .map(|(line, record)| {
                let cells = record
                    .iter()
                    .zip(&column_types)
                    .map(|(raw, ty)| ty.coerce(raw, na))
                    .collect();
                Row::new(cells, line)
            })
            .collect();

        Ok(Table::new(headers, column_types, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn read(data: &str) -> Result<Table> {
        CsvReader::new(data.as_bytes()).read_table()
    }

    #[test]
    fn test_csv_reader_basic() {
        let table = read("name,price\nParacetamol,12.5\nIbuprofen,30\n").unwrap();

        assert_eq!(table.headers(), &["name".to_string(), "price".to_string()]);
        assert_eq!(table.column_types(), &[ColumnType::Text, ColumnType::Number]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].cells[0], Cell::Text("Paracetamol".to_string()));
        assert_eq!(table.rows()[1].cells[1].as_number(), Some(30.0));
        assert_eq!(table.rows()[0].source_line, 2);
    }

    #[test]
    fn test_csv_reader_header_only() {
        let table = read("a,b,c\n").unwrap();
        assert_eq!(table.headers().len(), 3);
        assert!(table.is_empty());
    }

    #[test]
    fn test_csv_reader_empty_input() {
        let result = read("");
        assert!(matches!(result, Err(Error::InvalidFile(_))));
    }

    #[test]
    fn test_csv_reader_ragged_row() {
        let result = read("a,b\n1,2\n3\n");
        assert!(matches!(
            result,
            Err(Error::RaggedRow {
                line: 3,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_csv_reader_quoted_fields_and_missing() {
        let table = read("name,salt\n\"Crocin, 500\",\nDolo,NA\n").unwrap();

        assert_eq!(table.rows()[0].cells[0].as_field(), "Crocin, 500");
        assert!(table.rows()[0].cells[1].is_missing());
        assert!(table.rows()[1].cells[1].is_missing());
        assert_eq!(table.column_types()[1], ColumnType::Text);
    }

    #[test]
    fn test_csv_reader_strips_bom() {
        let table = read("\u{feff}name,price\nx,1\n").unwrap();
        assert_eq!(table.column_index("name"), Some(0));
    }

    #[test]
    fn test_csv_reader_invalid_utf8() {
        let data: &[u8] = b"name\n\xff\xfe\n";
        let result = CsvReader::new(data).read_table();
        assert!(matches!(result, Err(Error::Csv(_))));
    }

    #[test]
    fn test_csv_reader_tab_delimiter() {
        let config = CsvConfig {
            delimiter: b'\t',
            ..CsvConfig::default()
        };
        let table = CsvReader::new_with_config("a\tb\n1\t2\n".as_bytes(), config)
            .read_table()
            .unwrap();
        assert_eq!(table.headers().len(), 2);
    }

    #[test]
    fn test_csv_reader_gzip() {
        use flate2::write::GzEncoder;

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().with_extension("csv.gz");

        {
            let file = File::create(&temp_path).unwrap();
            let mut encoder = GzEncoder::new(file, flate2::Compression::default());
            writeln!(encoder, "name,qty").unwrap();
            writeln!(encoder, "compressed,1").unwrap();
            encoder.finish().unwrap();
        }

        let table = CsvReader::open(&temp_path).unwrap().read_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].cells[0].as_field(), "compressed");

        std::fs::remove_file(temp_path).unwrap();
    }
}
