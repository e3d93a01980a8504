//! CSV import core: configuration, reader, records and the demo flow

pub mod config;
pub mod demo;
pub mod reader;
pub mod record;

pub use config::{ColumnMapping, CsvConfiguration};
pub use demo::{DemoDataImporter, DemoImportError, ImportOutcome, ImportedProduct};
pub use reader::{CsvReadError, ProductCsvReader};
pub use record::{ParsedRecord, ProductRecords};
