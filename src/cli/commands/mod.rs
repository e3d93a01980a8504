//! Command implementations

pub mod completions;
pub mod credentials;
pub mod import_csv;
pub mod import_demo;
pub mod install;
pub mod remove_demo;
pub mod uninstall;
