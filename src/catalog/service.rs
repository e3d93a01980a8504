//! Product import pipeline: parse, dedup against the store, shape, create
//!
//! A single-pass, stateless pipeline per invocation: no retained state
//! between runs, no retries. Everything runs sequentially in the calling
//! thread; concurrent imports against the same store can race the
//! existence check, which is accepted.

use std::collections::HashSet;
use std::path::Path;

use crate::catalog::product::{
    ChannelVisibility, LocalizedText, NewProduct, ProductPrice, DEFAULT_STOCK, VISIBILITY_ALL,
};
use crate::catalog::store::{CatalogError, ProductStore};
use crate::core::identity::CatalogId;
use crate::import::config::CsvConfiguration;
use crate::import::reader::{CsvReadError, ProductCsvReader};
use crate::import::record::ProductRecords;

/// Maximum product numbers per existence query and products per create call.
pub const BATCH_SIZE: usize = 50;

/// Tax markup applied when shaping prices, in percent.
pub const DEFAULT_TAX_RATE: f64 = 19.0;

/// Orchestrates the import pipeline on top of any [`ProductStore`].
pub struct ProductService<S> {
    store: S,
    locale: String,
    currency_id: String,
}

impl<S: ProductStore> ProductService<S> {
    pub fn new(store: S, locale: impl Into<String>, currency_id: impl Into<String>) -> Self {
        Self {
            store,
            locale: locale.into(),
            currency_id: currency_id.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Parse product records from a CSV file.
    pub fn parse_products_from_csv(
        &self,
        path: &Path,
        config: &CsvConfiguration,
    ) -> Result<ProductRecords, CsvReadError> {
        ProductCsvReader::read_products(path, config)
    }

    /// Drop records whose product number already exists in the store.
    ///
    /// Numbers are checked in batches of [`BATCH_SIZE`]. A pure filter:
    /// existing products are never updated, only skipped.
    pub fn clear_existing_by_number(
        &self,
        mut records: ProductRecords,
    ) -> Result<ProductRecords, CatalogError> {
        let numbers: Vec<String> = records.product_numbers().map(str::to_string).collect();

        let mut existing = HashSet::new();
        for chunk in numbers.chunks(BATCH_SIZE) {
            existing.extend(self.store.existing_product_numbers(chunk)?);
        }

        records.retain(|r| !existing.contains(&r.product_number));
        Ok(records)
    }

    /// Turn surviving records into creation payloads.
    ///
    /// The tax and sales-channel references are resolved once per call, not
    /// per record; either failing aborts the whole shaping step. Payloads
    /// come out in the records' insertion order.
    pub fn shape_for_creation(
        &self,
        records: &ProductRecords,
        base_price: f64,
        tax_rate_percent: f64,
        category_id: Option<&str>,
    ) -> Result<Vec<NewProduct>, CatalogError> {
        let tax_id = self.store.default_tax_id()?;
        let sales_channel_id = self.store.storefront_sales_channel_id()?;
        let gross = base_price * (100.0 + tax_rate_percent) / 100.0;

        let payloads = records
            .iter()
            .map(|record| NewProduct {
                id: CatalogId::generate(),
                product_number: record.product_number.clone(),
                active: true,
                tax_id: tax_id.clone(),
                stock: DEFAULT_STOCK,
                shipping_free: false,
                purchase_price: gross,
                display_in_listing: true,
                name: LocalizedText::new(&self.locale, &record.name),
                description: record
                    .description
                    .as_ref()
                    .map(|d| LocalizedText::new(&self.locale, d)),
                price: ProductPrice {
                    currency_id: self.currency_id.clone(),
                    net: base_price,
                    gross,
                    linked: true,
                },
                visibilities: vec![ChannelVisibility {
                    sales_channel_id: sales_channel_id.clone(),
                    visibility: VISIBILITY_ALL,
                }],
                category_id: category_id.map(str::to_string),
                manufacturer_number: record.mpn.clone(),
                ean: record.ean.clone(),
                top_data_id: record.top_data_id.clone(),
                is_demo: true,
            })
            .collect();

        Ok(payloads)
    }

    /// Persist payloads in order, in batches of [`BATCH_SIZE`].
    ///
    /// No rollback across batches: if a later batch fails, earlier batches
    /// stay persisted. Callers must cope with partial success.
    pub fn create_products(&mut self, payloads: &[NewProduct]) -> Result<(), CatalogError> {
        for chunk in payloads.chunks(BATCH_SIZE) {
            self.store.create_products(chunk)?;
        }
        Ok(())
    }
}
