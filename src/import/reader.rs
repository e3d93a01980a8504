//! Line-oriented product CSV reader
//!
//! Deliberately NOT a quote-aware CSV parser: rows are split on the
//! configured delimiter and every cell has the enclosure character trimmed
//! from both ends. A delimiter inside a quoted field is therefore not
//! respected. This is a known limitation of the import format, kept so files
//! that imported before keep importing the same way.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::import::config::CsvConfiguration;
use crate::import::record::{ParsedRecord, ProductRecords};

/// Errors raised while opening or reading a product CSV file.
#[derive(Debug, Error)]
pub enum CsvReadError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("could not open file {path}: {source}")]
    FileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads product data from delimiter-separated files into `ProductRecords`.
pub struct ProductCsvReader;

impl ProductCsvReader {
    /// Read products from `path` according to `config`.
    ///
    /// Returns one record per distinct product number within the configured
    /// line range; later duplicate numbers overwrite earlier ones. Rows
    /// missing the number or name cell are skipped silently.
    pub fn read_products(
        path: &Path,
        config: &CsvConfiguration,
    ) -> Result<ProductRecords, CsvReadError> {
        if !path.exists() {
            return Err(CsvReadError::FileNotFound(path.to_path_buf()));
        }

        let file = File::open(path).map_err(|source| CsvReadError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        Self::read_from(BufReader::new(file), config)
    }

    /// Read products from any buffered reader.
    ///
    /// Iteration stops outright once the line counter passes
    /// `config.end_line()`; lines beyond the range are never pulled from
    /// the underlying reader.
    pub fn read_from<R: BufRead>(
        reader: R,
        config: &CsvConfiguration,
    ) -> Result<ProductRecords, CsvReadError> {
        let mut products = ProductRecords::new();

        for (idx, line) in reader.lines().enumerate() {
            let line_number = idx + 1;

            if let Some(end) = config.end_line() {
                if line_number > end {
                    break;
                }
            }
            if line_number < config.start_line() {
                continue;
            }

            let line = line?;
            if let Some(record) = Self::parse_row(&line, config) {
                products.insert(record);
            }
        }

        Ok(products)
    }

    /// Split one line and map it to a record, or `None` when the row lacks
    /// the number or name cell.
    fn parse_row(line: &str, config: &CsvConfiguration) -> Option<ParsedRecord> {
        let enclosure = config.enclosure();
        let values: Vec<&str> = line
            .split(config.delimiter())
            .map(|cell| cell.trim_matches(enclosure))
            .collect();

        let mapping = config.columns();
        let number = values.get(mapping.number)?;
        let name = values.get(mapping.name)?;

        let cell = |index: Option<usize>| {
            index
                .and_then(|i| values.get(i))
                .map(|v| (*v).to_string())
        };

        let mut record = ParsedRecord::new(*number, *name);
        record.top_data_id = cell(mapping.wsid);
        record.description = cell(mapping.description);
        record.ean = cell(mapping.ean);
        record.mpn = cell(mapping.mpn);
        record.brand = cell(mapping.brand);
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::config::ColumnMapping;
    use std::io::{Cursor, Read};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn config(start: usize, end: Option<usize>) -> CsvConfiguration {
        CsvConfiguration::new(
            ';',
            '"',
            start,
            end,
            ColumnMapping {
                number: 0,
                name: 1,
                ean: Some(2),
                mpn: Some(3),
                ..ColumnMapping::default()
            },
        )
    }

    /// Reader wrapper counting the bytes actually pulled from the source.
    struct CountingReader<R> {
        inner: R,
        bytes_read: Arc<AtomicUsize>,
    }

    impl<R: Read> Read for CountingReader<R> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.inner.read(buf)?;
            self.bytes_read.fetch_add(n, Ordering::SeqCst);
            Ok(n)
        }
    }

    #[test]
    fn test_reads_one_record_per_distinct_number() {
        let input = "A-1;Widget;4001;M1\nB-2;Gadget;4002;M2\nA-1;Widget v2;4003;M3\n";
        let records =
            ProductCsvReader::read_from(Cursor::new(input), &config(1, None)).unwrap();

        assert_eq!(records.len(), 2);
        let a1 = records.get("A-1").unwrap();
        assert_eq!(a1.name, "Widget v2");
        assert_eq!(a1.ean.as_deref(), Some("4003"));
    }

    #[test]
    fn test_enclosure_trimmed_from_both_ends() {
        let input = "\"A-1\";\"Widget\";\"4001\";\"M1\"\n";
        let records =
            ProductCsvReader::read_from(Cursor::new(input), &config(1, None)).unwrap();

        let a1 = records.get("A-1").unwrap();
        assert_eq!(a1.name, "Widget");
        assert_eq!(a1.mpn.as_deref(), Some("M1"));
    }

    #[test]
    fn test_lines_before_start_skipped_even_if_malformed() {
        let input = "garbage header line\nA-1;Widget;4001;M1\n";
        let records =
            ProductCsvReader::read_from(Cursor::new(input), &config(2, None)).unwrap();

        assert_eq!(records.len(), 1);
        assert!(!records.contains("garbage header line"));
    }

    #[test]
    fn test_row_missing_required_cell_is_skipped_not_an_error() {
        // Second row has no name cell at index 1
        let input = "A-1;Widget;4001;M1\nB-2\nC-3;Gizmo;4003;M3\n";
        let records =
            ProductCsvReader::read_from(Cursor::new(input), &config(1, None)).unwrap();

        assert_eq!(records.len(), 2);
        assert!(!records.contains("B-2"));
    }

    #[test]
    fn test_optional_field_present_when_cell_empty() {
        let input = "A-1;Widget;;M1\n";
        let records =
            ProductCsvReader::read_from(Cursor::new(input), &config(1, None)).unwrap();

        // Empty cell at a mapped index is still included
        assert_eq!(records.get("A-1").unwrap().ean.as_deref(), Some(""));
    }

    #[test]
    fn test_optional_field_absent_when_column_beyond_row() {
        let input = "A-1;Widget;4001\n";
        let records =
            ProductCsvReader::read_from(Cursor::new(input), &config(1, None)).unwrap();

        let a1 = records.get("A-1").unwrap();
        assert_eq!(a1.ean.as_deref(), Some("4001"));
        assert_eq!(a1.mpn, None);
    }

    #[test]
    fn test_end_line_is_a_hard_stop() {
        let mut input = String::new();
        for i in 1..=100 {
            input.push_str(&format!("P-{i};Product {i};400{i};M{i}\n"));
        }
        let total_len = input.len();

        let bytes_read = Arc::new(AtomicUsize::new(0));
        let counting = CountingReader {
            inner: Cursor::new(input),
            bytes_read: Arc::clone(&bytes_read),
        };

        let records =
            ProductCsvReader::read_from(BufReader::with_capacity(16, counting), &config(1, Some(2)))
                .unwrap();

        assert_eq!(records.len(), 2);
        assert!(records.contains("P-1"));
        assert!(records.contains("P-2"));
        // The reader must break out, not merely filter: only a small prefix
        // of the source may have been consumed.
        assert!(bytes_read.load(Ordering::SeqCst) < total_len / 2);
    }

    #[test]
    fn test_range_combines_start_and_end() {
        let input = "P-1;one\nP-2;two\nP-3;three\nP-4;four\n";
        let records =
            ProductCsvReader::read_from(Cursor::new(input), &config(2, Some(3))).unwrap();

        assert_eq!(records.len(), 2);
        assert!(records.contains("P-2"));
        assert!(records.contains("P-3"));
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let err = ProductCsvReader::read_products(
            Path::new("/definitely/not/here.csv"),
            &config(1, None),
        )
        .unwrap_err();
        assert!(matches!(err, CsvReadError::FileNotFound(_)));
    }

    #[test]
    fn test_roundtrip_with_custom_delimiter_and_trim() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("products.csv");

        let rows = [
            ("N-100", "Laser printer", "4006381333931", "LP-100"),
            ("N-101", "Ink cartridge", "4006381333948", "IC-101"),
            ("N-102", "Toner drum", "4006381333955", "TD-102"),
        ];
        let mut contents = String::new();
        for (number, name, ean, mpn) in rows {
            contents.push_str(&format!("'{number}'|'{name}'|'{ean}'|'{mpn}'\n"));
        }
        std::fs::write(&path, contents).unwrap();

        let config = CsvConfiguration::new(
            '|',
            '\'',
            1,
            None,
            ColumnMapping {
                number: 0,
                name: 1,
                ean: Some(2),
                mpn: Some(3),
                ..ColumnMapping::default()
            },
        );
        let records = ProductCsvReader::read_products(&path, &config).unwrap();

        assert_eq!(records.len(), rows.len());
        for (number, name, ean, mpn) in rows {
            let record = records.get(number).unwrap();
            assert_eq!(record.name, name);
            assert_eq!(record.ean.as_deref(), Some(ean));
            assert_eq!(record.mpn.as_deref(), Some(mpn));
        }
    }
}
