//! Demo product data import
//!
//! The bundled demo file is a fixed-format CSV (`;` separated, `"` quoted)
//! whose columns are located by header name rather than by configured index:
//! `article_no`, `short_desc`, `ean` and `oem` must all be present. Column
//! detection happens here in the calling layer; the generic reader stays
//! index-driven.

use rust_embed::Embed;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;
use thiserror::Error;

use crate::catalog::service::{ProductService, DEFAULT_TAX_RATE};
use crate::catalog::store::{CatalogError, ProductStore};
use crate::import::reader::CsvReadError;
use crate::import::record::{ParsedRecord, ProductRecords};

/// Field separator of the demo file.
pub const DEMO_DELIMITER: char = ';';

/// Quote character trimmed from demo file cells.
pub const DEMO_ENCLOSURE: char = '"';

/// Net base price every demo product is created with.
pub const DEMO_BASE_PRICE: f64 = 100_000.0;

#[derive(Embed)]
#[folder = "resources/"]
struct DemoResources;

/// Name of the demo CSV shipped inside the binary.
const BUNDLED_DEMO_FILE: &str = "demo-products.csv";

/// Errors raised by the demo import flow.
#[derive(Debug, Error)]
pub enum DemoImportError {
    #[error(transparent)]
    Read(#[from] CsvReadError),

    #[error("file with demo data is empty")]
    EmptyFile,

    #[error("required column '{0}' not found in header")]
    MissingRequiredColumn(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Column positions discovered from the demo file's header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DemoColumns {
    number: usize,
    name: usize,
    ean: usize,
    mpn: usize,
}

impl DemoColumns {
    /// Locate the four demo columns by header name.
    fn detect(header: &str) -> Result<Self, DemoImportError> {
        let mut number = None;
        let mut name = None;
        let mut ean = None;
        let mut mpn = None;

        for (idx, cell) in header.split(DEMO_DELIMITER).enumerate() {
            match cell.trim() {
                "article_no" => number = Some(idx),
                "short_desc" => name = Some(idx),
                "ean" => ean = Some(idx),
                "oem" => mpn = Some(idx),
                _ => {}
            }
        }

        let require = |col: Option<usize>, label: &str| {
            col.ok_or_else(|| DemoImportError::MissingRequiredColumn(label.to_string()))
        };

        Ok(Self {
            number: require(number, "article_no")?,
            name: require(name, "short_desc")?,
            ean: require(ean, "ean")?,
            mpn: require(mpn, "oem")?,
        })
    }
}

/// One product as reported back after a demo import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportedProduct {
    pub product_number: String,
    pub name: String,
    pub ean: Option<String>,
    pub mpn: Option<String>,
}

/// Result of a demo import run, serializable for machine consumers.
#[derive(Debug, Serialize)]
pub struct ImportOutcome {
    pub success: bool,
    pub additional_info: String,
    pub imported: Vec<ImportedProduct>,
}

impl ImportOutcome {
    fn nothing_to_add() -> Self {
        Self {
            success: true,
            additional_info: "Nothing to add".to_string(),
            imported: Vec::new(),
        }
    }

    fn added(imported: Vec<ImportedProduct>) -> Self {
        Self {
            success: true,
            additional_info: format!("{} products has been added", imported.len()),
            imported,
        }
    }
}

/// Runs the demo import: header detection, parse, dedup, shape, create.
pub struct DemoDataImporter<'a, S> {
    service: &'a mut ProductService<S>,
}

impl<'a, S: ProductStore> DemoDataImporter<'a, S> {
    pub fn new(service: &'a mut ProductService<S>) -> Self {
        Self { service }
    }

    /// Import the demo CSV bundled into the binary.
    pub fn install_bundled(
        &mut self,
        category_id: Option<&str>,
    ) -> Result<ImportOutcome, DemoImportError> {
        let data = DemoResources::get(BUNDLED_DEMO_FILE).ok_or_else(|| {
            CsvReadError::FileNotFound(Path::new(BUNDLED_DEMO_FILE).to_path_buf())
        })?;
        self.install_from_reader(Cursor::new(data.data.as_ref().to_vec()), category_id)
    }

    /// Import a demo CSV from the filesystem.
    pub fn install_from_path(
        &mut self,
        path: &Path,
        category_id: Option<&str>,
    ) -> Result<ImportOutcome, DemoImportError> {
        if !path.exists() {
            return Err(CsvReadError::FileNotFound(path.to_path_buf()).into());
        }
        let file = File::open(path).map_err(|source| CsvReadError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        self.install_from_reader(BufReader::new(file), category_id)
    }

    /// Import demo data from any buffered reader.
    pub fn install_from_reader<R: BufRead>(
        &mut self,
        reader: R,
        category_id: Option<&str>,
    ) -> Result<ImportOutcome, DemoImportError> {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line.map_err(CsvReadError::from)?,
            None => return Err(DemoImportError::EmptyFile),
        };
        let columns = DemoColumns::detect(&header)?;

        let mut products = ProductRecords::new();
        for line in lines {
            let line = line.map_err(CsvReadError::from)?;
            if let Some(record) = parse_demo_row(&line, columns) {
                products.insert(record);
            }
        }

        let remaining = self.service.clear_existing_by_number(products)?;
        if remaining.is_empty() {
            return Ok(ImportOutcome::nothing_to_add());
        }

        let payloads = self.service.shape_for_creation(
            &remaining,
            DEMO_BASE_PRICE,
            DEFAULT_TAX_RATE,
            category_id,
        )?;
        self.service.create_products(&payloads)?;

        let imported = payloads
            .iter()
            .map(|p| ImportedProduct {
                product_number: p.product_number.clone(),
                name: p.name.value.clone(),
                ean: p.ean.clone(),
                mpn: p.manufacturer_number.clone(),
            })
            .collect();

        Ok(ImportOutcome::added(imported))
    }
}

/// Parse one demo data row, or `None` when the number or name cell is
/// missing. Cells are quote-trimmed, then whitespace-trimmed.
fn parse_demo_row(line: &str, columns: DemoColumns) -> Option<ParsedRecord> {
    let values: Vec<String> = line
        .split(DEMO_DELIMITER)
        .map(|cell| cell.trim_matches(DEMO_ENCLOSURE).trim().to_string())
        .collect();

    let number = values.get(columns.number)?;
    let name = values.get(columns.name)?;

    let mut record = ParsedRecord::new(number, name);
    record.ean = values.get(columns.ean).cloned();
    record.mpn = values.get(columns.mpn).cloned();
    Some(record)
}
