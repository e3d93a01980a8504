//! CSV reading configuration

/// Column indices for the logical product fields of a CSV file.
///
/// `number` and `name` are mandatory; the rest are `None` when the column is
/// not present in this particular file. Indices are 0-based positions within
/// a delimiter-split row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub number: usize,
    pub name: usize,
    /// External webservice id column (maps to `ParsedRecord::top_data_id`).
    pub wsid: Option<usize>,
    pub description: Option<usize>,
    pub ean: Option<usize>,
    pub mpn: Option<usize>,
    pub brand: Option<usize>,
}

/// How to interpret a CSV file: field separator, the character trimmed from
/// both ends of every cell, the inclusive 1-based line range to process, and
/// the column mapping.
///
/// Pure data holder; nothing is validated at construction. The reader and
/// the command layer own sanity checks.
#[derive(Debug, Clone)]
pub struct CsvConfiguration {
    delimiter: char,
    enclosure: char,
    start_line: usize,
    end_line: Option<usize>,
    columns: ColumnMapping,
}

impl CsvConfiguration {
    pub fn new(
        delimiter: char,
        enclosure: char,
        start_line: usize,
        end_line: Option<usize>,
        columns: ColumnMapping,
    ) -> Self {
        Self {
            delimiter,
            enclosure,
            start_line,
            end_line,
            columns,
        }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn enclosure(&self) -> char {
        self.enclosure
    }

    pub fn start_line(&self) -> usize {
        self.start_line
    }

    /// Last physical line to process, inclusive. `None` means until EOF.
    pub fn end_line(&self) -> Option<usize> {
        self.end_line
    }

    pub fn columns(&self) -> &ColumnMapping {
        &self.columns
    }
}
