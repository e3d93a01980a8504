//! `demodata import-csv` - import products from a CSV file
//!
//! Column positions, line range, delimiter and trim character all come from
//! the command line; the file itself needs no header row.

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::catalog::{ProductService, BATCH_SIZE, DEFAULT_TAX_RATE};
use crate::cli::helpers::open_catalog;
use crate::cli::GlobalOpts;
use crate::core::Config;
use crate::import::{ColumnMapping, CsvConfiguration};

#[derive(clap::Args, Debug)]
pub struct ImportCsvArgs {
    /// Path to the CSV file
    #[arg(long)]
    pub file: PathBuf,

    /// Column index for the product number (0-based)
    #[arg(long)]
    pub number: usize,

    /// Column index for the product name
    #[arg(long)]
    pub name: usize,

    /// Column index for the webservice id
    #[arg(long)]
    pub wsid: Option<usize>,

    /// Column index for the product description
    #[arg(long)]
    pub description: Option<usize>,

    /// Column index for the EAN
    #[arg(long)]
    pub ean: Option<usize>,

    /// Column index for the MPN
    #[arg(long)]
    pub mpn: Option<usize>,

    /// Column index for the brand
    #[arg(long)]
    pub brand: Option<usize>,

    /// First line to import (1-based)
    #[arg(long, default_value_t = 1)]
    pub start: usize,

    /// Last line to import, inclusive (default: until end of file)
    #[arg(long)]
    pub end: Option<usize>,

    /// CSV column delimiter
    #[arg(long, default_value_t = ';')]
    pub divider: char,

    /// Character to trim from values
    #[arg(long, default_value_t = '"')]
    pub trim: char,

    /// Net base price for created products
    #[arg(long, default_value_t = 1.0)]
    pub price: f64,

    /// Category to assign the products to
    #[arg(long)]
    pub category_id: Option<String>,
}

pub fn run(args: ImportCsvArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let catalog = open_catalog(global)?;
    let mut service = ProductService::new(catalog, config.locale(), config.currency());

    let csv_config = CsvConfiguration::new(
        args.divider,
        args.trim,
        args.start,
        args.end,
        ColumnMapping {
            number: args.number,
            name: args.name,
            wsid: args.wsid,
            description: args.description,
            ean: args.ean,
            mpn: args.mpn,
            brand: args.brand,
        },
    );

    let products = service
        .parse_products_from_csv(&args.file, &csv_config)
        .map_err(|e| miette::miette!("{}", e))?;
    if !global.quiet {
        println!("Products in file: {}", style(products.len()).cyan());
    }

    let products = service
        .clear_existing_by_number(products)
        .map_err(|e| miette::miette!("{}", e))?;
    if !global.quiet {
        println!("Products not added yet: {}", style(products.len()).cyan());
    }

    if products.is_empty() {
        return Err(miette::miette!(
            "no new products found in {}",
            args.file.display()
        ));
    }

    let payloads = service
        .shape_for_creation(
            &products,
            args.price,
            DEFAULT_TAX_RATE,
            args.category_id.as_deref(),
        )
        .map_err(|e| miette::miette!("{}", e))?;

    let total = payloads.len();
    for (batch_idx, chunk) in payloads.chunks(BATCH_SIZE).enumerate() {
        if !global.quiet {
            println!(
                "adding {} of {} products...",
                batch_idx * BATCH_SIZE + chunk.len(),
                total
            );
        }
        service
            .create_products(chunk)
            .map_err(|e| miette::miette!("{}", e))?;
    }

    if !global.quiet {
        println!(
            "{} Imported {} product(s) from {}",
            style("✓").green(),
            style(total).cyan(),
            style(args.file.display()).yellow()
        );
    }

    Ok(())
}
