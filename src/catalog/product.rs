//! Product creation payloads

use crate::core::identity::CatalogId;

/// Custom field set registered at plugin install time.
pub const CUSTOM_FIELD_SET_NAME: &str = "demodata_importer";

/// Boolean custom field marking a product as imported demo data, so the
/// whole batch can be found and removed later.
pub const IS_DEMO_PRODUCT_FIELD: &str = "demodata_is_demo_product";

/// Product is visible everywhere: listings, search and direct links.
pub const VISIBILITY_ALL: i64 = 30;

/// Stock every demo product is created with.
pub const DEFAULT_STOCK: i64 = 10;

/// A piece of translatable text keyed by locale code (e.g. `en-GB`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedText {
    pub locale: String,
    pub value: String,
}

impl LocalizedText {
    pub fn new(locale: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            value: value.into(),
        }
    }
}

/// Net/gross price pair in a single currency.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPrice {
    pub currency_id: String,
    pub net: f64,
    pub gross: f64,
    /// Gross is derived from net via the tax rate (not set independently).
    pub linked: bool,
}

/// Visibility of a product in one sales channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelVisibility {
    pub sales_channel_id: String,
    pub visibility: i64,
}

/// Everything needed to persist one new product.
///
/// Built once per import run by the shaping step, handed to the store in
/// batches and never mutated afterwards. Removal is a separate path keyed
/// by the demo marker field.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: CatalogId,
    pub product_number: String,
    pub active: bool,
    pub tax_id: String,
    pub stock: i64,
    pub shipping_free: bool,
    pub purchase_price: f64,
    pub display_in_listing: bool,
    pub name: LocalizedText,
    pub description: Option<LocalizedText>,
    pub price: ProductPrice,
    pub visibilities: Vec<ChannelVisibility>,
    pub category_id: Option<String>,
    pub manufacturer_number: Option<String>,
    pub ean: Option<String>,
    pub top_data_id: Option<String>,
    /// When set, the demo marker custom field is written alongside.
    pub is_demo: bool,
}
