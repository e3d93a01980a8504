//! Product catalog: payloads, the store boundary and the import service

pub mod product;
pub mod service;
pub mod sqlite;
pub mod store;

pub use product::{
    ChannelVisibility, LocalizedText, NewProduct, ProductPrice, CUSTOM_FIELD_SET_NAME,
    IS_DEMO_PRODUCT_FIELD, VISIBILITY_ALL,
};
pub use service::{ProductService, BATCH_SIZE, DEFAULT_TAX_RATE};
pub use sqlite::SqliteCatalog;
pub use store::{CatalogError, CategoryEntry, ProductStore};
