//! Shared helper functions for CLI commands

use dialoguer::Confirm;
use miette::{IntoDiagnostic, Result};

use crate::catalog::SqliteCatalog;
use crate::cli::GlobalOpts;
use crate::core::Config;

/// Open the catalog database named by `--db`, the environment or the
/// config file, creating it (and its schema) when missing.
pub fn open_catalog(global: &GlobalOpts) -> Result<SqliteCatalog> {
    let path = global
        .db
        .clone()
        .unwrap_or_else(|| Config::load().database());
    SqliteCatalog::open(&path).map_err(|e| miette::miette!("{}", e))
}

/// Interactive yes/no confirmation, defaulting to yes.
pub fn confirm_proceed(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .into_diagnostic()
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
