//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

/// Tool configuration, merged from file and environment.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the catalog database
    pub database: Option<PathBuf>,

    /// Locale code used for translatable product fields
    pub locale: Option<String>,

    /// Currency id written into product prices
    pub currency: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/demodata/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Environment variables
        if let Ok(database) = std::env::var("DEMODATA_DB") {
            config.database = Some(PathBuf::from(database));
        }
        if let Ok(locale) = std::env::var("DEMODATA_LOCALE") {
            config.locale = Some(locale);
        }
        if let Ok(currency) = std::env::var("DEMODATA_CURRENCY") {
            config.currency = Some(currency);
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "demodata")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.locale.is_some() {
            self.locale = other.locale;
        }
        if other.currency.is_some() {
            self.currency = other.currency;
        }
    }

    /// Catalog database path, defaulting to `catalog.db` in the working
    /// directory.
    pub fn database(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| PathBuf::from("catalog.db"))
    }

    /// Locale code for translatable fields.
    pub fn locale(&self) -> String {
        self.locale.clone().unwrap_or_else(|| "en-GB".to_string())
    }

    /// Currency id for product prices.
    pub fn currency(&self) -> String {
        self.currency.clone().unwrap_or_else(|| "EUR".to_string())
    }
}
