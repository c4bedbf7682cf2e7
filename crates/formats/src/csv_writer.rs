//! Delimited-text table writer
//!
//! Writes the header followed by every row, quoting fields only when
//! needed. Gzip output is chosen from the file name. Call `finish()` to
//! flush buffered data and, for gzip, write the stream trailer.

use crate::reader::Compression;
use crate::table::{Row, Table};
use crate::{Error, Result};
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Output sink, plain or gzip-compressed
enum Sink {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Sink {
    fn finish(self) -> io::Result<()> {
        match self {
            Sink::Plain(mut w) => w.flush(),
            Sink::Gzip(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Plain(w) => w.write(buf),
            Sink::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Plain(w) => w.flush(),
            Sink::Gzip(w) => w.flush(),
        }
    }
}

/// Writer producing a delimited file from a [`Table`]
pub struct CsvWriter {
    writer: csv::Writer<Sink>,
    rows_written: usize,
}

impl CsvWriter {
    /// Create (or truncate) a comma-separated file at `path`
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::create_with_delimiter(path, b',')
    }

    pub fn create_with_delimiter<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        let file = BufWriter::new(File::create(path)?);

        let sink = match Compression::from_path(path) {
            Compression::Gzip => {
                debug!("Creating gzip-compressed table: {:?}", path);
                Sink::Gzip(GzEncoder::new(file, flate2::Compression::default()))
            }
            Compression::None => Sink::Plain(file),
        };

        let writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(sink);

        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    pub fn write_header(&mut self, headers: &[String]) -> Result<()> {
        self.writer.write_record(headers)?;
        Ok(())
    }

    pub fn write_row(&mut self, row: &Row) -> Result<()> {
        self.writer
            .write_record(row.cells.iter().map(|c| c.as_field()))?;
        self.rows_written += 1;
        Ok(())
    }

    /// Write the header and every row of a table
    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        self.write_header(table.headers())?;
        for row in table.rows() {
            self.write_row(row)?;
        }
        Ok(())
    }

    /// Number of data rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush everything to disk. Must be called for gzip output to be valid.
    pub fn finish(self) -> Result<()> {
        let sink = self
            .writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))?;
        sink.finish()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, ColumnType};
    use tempfile::tempdir;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn test_write_table_plain() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let table = Table::new(
            vec!["name".to_string(), "salt".to_string(), "price".to_string()],
            vec![ColumnType::Text, ColumnType::Text, ColumnType::Text],
            vec![
                Row::new(vec![text("Crocin, 500"), Cell::Missing, text("12")], 2),
                Row::new(vec![text("Dolo"), text("say \"hi\""), text("9")], 3),
            ],
        );

        let mut writer = CsvWriter::create(&path).unwrap();
        writer.write_table(&table).unwrap();
        assert_eq!(writer.rows_written(), 2);
        writer.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "name,salt,price\n\"Crocin, 500\",,12\nDolo,\"say \"\"hi\"\"\",9\n"
        );
    }

    #[test]
    fn test_write_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        let table = Table::new(vec!["a".to_string()], vec![ColumnType::Text], vec![]);
        let mut writer = CsvWriter::create(&path).unwrap();
        writer.write_table(&table).unwrap();
        writer.finish().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\n");
    }

    #[test]
    fn test_write_gzip() {
        use flate2::read::GzDecoder;
        use std::io::Read;

        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv.gz");

        let table = Table::new(
            vec!["a".to_string()],
            vec![ColumnType::Text],
            vec![Row::new(vec![text("zipped")], 2)],
        );
        let mut writer = CsvWriter::create(&path).unwrap();
        writer.write_table(&table).unwrap();
        writer.finish().unwrap();

        let mut decoded = String::new();
        GzDecoder::new(File::open(&path).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, "a\nzipped\n");
    }

    #[test]
    fn test_create_in_missing_directory() {
        let dir = tempdir().unwrap();
        let result = CsvWriter::create(dir.path().join("no/such/dir/out.csv"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
