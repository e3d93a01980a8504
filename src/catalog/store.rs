//! Abstract product store boundary
//!
//! The import pipeline only ever talks to the catalog through this trait:
//! an existence check, a batch create, the two shaping preconditions and
//! the demo-removal queries. `SqliteCatalog` is the shipped implementation;
//! tests substitute mocks.

use std::collections::HashSet;
use thiserror::Error;

use crate::catalog::product::NewProduct;

/// Errors from the product store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A lookup the shaping step depends on (tax, sales channel) failed.
    #[error("{0}")]
    PreconditionUnresolved(String),

    #[error("catalog storage error: {0}")]
    Storage(String),
}

/// A category as offered for interactive selection.
#[derive(Debug, Clone)]
pub struct CategoryEntry {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
}

/// Synchronous access to the product catalog.
///
/// Callers are responsible for batching: `existing_product_numbers` and
/// `create_products` are invoked with at most `ProductService` batch-size
/// items per call.
pub trait ProductStore {
    /// Which of the given product numbers already exist in the catalog.
    fn existing_product_numbers(
        &self,
        numbers: &[String],
    ) -> Result<HashSet<String>, CatalogError>;

    /// Persist a batch of new products. No rollback across calls: products
    /// created by earlier calls stay persisted if a later call fails.
    fn create_products(&mut self, products: &[NewProduct]) -> Result<(), CatalogError>;

    /// Tax to apply to created products: a 19% rate when present, otherwise
    /// the first configured tax.
    fn default_tax_id(&self) -> Result<String, CatalogError>;

    /// The oldest storefront sales channel.
    fn storefront_sales_channel_id(&self) -> Result<String, CatalogError>;

    /// Ids of all products carrying the demo marker field.
    fn demo_product_ids(&self) -> Result<Vec<String>, CatalogError>;

    /// Delete products by id; returns how many were removed.
    fn delete_products(&mut self, ids: &[String]) -> Result<usize, CatalogError>;

    /// All categories, for interactive selection.
    fn categories(&self) -> Result<Vec<CategoryEntry>, CatalogError>;

    /// Display name of one category, if it exists.
    fn category_name(&self, id: &str) -> Result<Option<String>, CatalogError>;
}
