//! demodata: demo product data importer
//!
//! Imports demo product data from CSV files into a SQLite-backed product
//! catalog, flags everything it creates with a custom field, and removes
//! the whole batch again on request.

pub mod catalog;
pub mod cli;
pub mod core;
pub mod import;
