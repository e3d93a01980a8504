//! SQLite-backed product catalog
//!
//! One database file holds the whole catalog: products with their
//! translations, prices, visibilities and custom fields, plus the baseline
//! data (taxes, sales channels, categories) and the system configuration
//! table. Opening ensures the schema exists; `install` seeds baseline rows
//! and registers the demo-marker custom field.

use chrono::Utc;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::catalog::product::{NewProduct, CUSTOM_FIELD_SET_NAME, IS_DEMO_PRODUCT_FIELD};
use crate::catalog::store::{CatalogError, CategoryEntry, ProductStore};
use crate::core::identity::CatalogId;

/// Current schema version for migrations
const SCHEMA_VERSION: i32 = 1;

/// System-config keys for the webservice demo credentials.
pub const CONFIG_KEY_API_USERNAME: &str = "connector.api_username";
pub const CONFIG_KEY_API_KEY: &str = "connector.api_key";
pub const CONFIG_KEY_API_SALT: &str = "connector.api_salt";

/// Published demo credentials for the product data webservice.
pub const DEMO_API_USERNAME: &str = "6";
pub const DEMO_API_KEY: &str = "nTI9kbsniVWT13Ns";
pub const DEMO_API_SALT: &str = "oateouq974fpby5t6ldf8glzo85mr9t6aebozrox";

/// The product catalog backed by SQLite
pub struct SqliteCatalog {
    conn: Connection,
}

impl SqliteCatalog {
    /// Open or create a catalog database at the given path.
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| CatalogError::Storage(e.to_string()))?;
            }
        }

        let conn = Connection::open(path)?;
        // WAL mode for better concurrent access
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        let catalog = Self { conn };
        catalog.init_schema()?;
        Ok(catalog)
    }

    /// In-memory catalog, for tests.
    pub fn open_in_memory() -> Result<Self, CatalogError> {
        let conn = Connection::open_in_memory()?;
        let catalog = Self { conn };
        catalog.init_schema()?;
        Ok(catalog)
    }

    fn init_schema(&self) -> Result<(), CatalogError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS tax (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                tax_rate REAL NOT NULL
            );

            CREATE TABLE IF NOT EXISTS sales_channel (
                id TEXT PRIMARY KEY,
                channel_type TEXT NOT NULL,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS category (
                id TEXT PRIMARY KEY,
                parent_id TEXT,
                name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS product (
                id TEXT PRIMARY KEY,
                product_number TEXT NOT NULL UNIQUE,
                active INTEGER NOT NULL,
                tax_id TEXT NOT NULL,
                stock INTEGER NOT NULL,
                shipping_free INTEGER NOT NULL,
                purchase_price REAL NOT NULL,
                display_in_listing INTEGER NOT NULL,
                manufacturer_number TEXT,
                ean TEXT,
                top_data_id TEXT,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_product_number ON product(product_number);

            CREATE TABLE IF NOT EXISTS product_translation (
                product_id TEXT NOT NULL,
                locale TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                PRIMARY KEY (product_id, locale),
                FOREIGN KEY (product_id) REFERENCES product(id) ON DELETE CASCADE
            );

            CREATE TABLE IF NOT EXISTS product_price (
                product_id TEXT NOT NULL,
                currency_id TEXT NOT NULL,
                net REAL NOT NULL,
                gross REAL NOT NULL,
                linked INTEGER NOT NULL,
                PRIMARY KEY (product_id, currency_id),
                FOREIGN KEY (product_id) REFERENCES product(id) ON DELETE CASCADE
            );

            CREATE TABLE IF NOT EXISTS product_visibility (
                product_id TEXT NOT NULL,
                sales_channel_id TEXT NOT NULL,
                visibility INTEGER NOT NULL,
                PRIMARY KEY (product_id, sales_channel_id),
                FOREIGN KEY (product_id) REFERENCES product(id) ON DELETE CASCADE
            );

            CREATE TABLE IF NOT EXISTS product_category (
                product_id TEXT NOT NULL,
                category_id TEXT NOT NULL,
                PRIMARY KEY (product_id, category_id),
                FOREIGN KEY (product_id) REFERENCES product(id) ON DELETE CASCADE
            );

            CREATE TABLE IF NOT EXISTS product_custom_field (
                product_id TEXT NOT NULL,
                field_name TEXT NOT NULL,
                value_bool INTEGER NOT NULL,
                PRIMARY KEY (product_id, field_name),
                FOREIGN KEY (product_id) REFERENCES product(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_custom_field_name
                ON product_custom_field(field_name);

            CREATE TABLE IF NOT EXISTS custom_field_set (
                name TEXT PRIMARY KEY,
                label TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS custom_field (
                name TEXT PRIMARY KEY,
                set_name TEXT NOT NULL,
                field_type TEXT NOT NULL,
                label TEXT NOT NULL,
                FOREIGN KEY (set_name) REFERENCES custom_field_set(name) ON DELETE CASCADE
            );

            CREATE TABLE IF NOT EXISTS system_config (
                id TEXT PRIMARY KEY,
                configuration_key TEXT NOT NULL UNIQUE,
                configuration_value TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )?;

        let version: Option<i32> = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?;
        if version.is_none() {
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![SCHEMA_VERSION],
            )?;
        }

        Ok(())
    }

    /// Seed baseline data and register the demo-marker custom field.
    ///
    /// Idempotent: existing rows are left alone, so running `install` on a
    /// populated catalog is harmless.
    pub fn install(&self) -> Result<(), CatalogError> {
        self.register_custom_field_set()?;

        let tax_count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM tax", [], |row| row.get(0))?;
        if tax_count == 0 {
            self.conn.execute(
                "INSERT INTO tax (id, name, tax_rate) VALUES (?1, 'Standard rate', 19.0)",
                params![CatalogId::generate().to_string()],
            )?;
            self.conn.execute(
                "INSERT INTO tax (id, name, tax_rate) VALUES (?1, 'Reduced rate', 7.0)",
                params![CatalogId::generate().to_string()],
            )?;
        }

        let channel_count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM sales_channel", [], |row| row.get(0))?;
        if channel_count == 0 {
            self.conn.execute(
                "INSERT INTO sales_channel (id, channel_type, name, created_at)
                 VALUES (?1, 'storefront', 'Storefront', ?2)",
                params![CatalogId::generate().to_string(), Utc::now().to_rfc3339()],
            )?;
        }

        let category_count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM category", [], |row| row.get(0))?;
        if category_count == 0 {
            let root = CatalogId::generate().to_string();
            self.conn.execute(
                "INSERT INTO category (id, parent_id, name) VALUES (?1, NULL, 'Catalogue')",
                params![root],
            )?;
            for name in ["Hardware", "Accessories"] {
                self.conn.execute(
                    "INSERT INTO category (id, parent_id, name) VALUES (?1, ?2, ?3)",
                    params![CatalogId::generate().to_string(), root, name],
                )?;
            }
        }

        Ok(())
    }

    fn register_custom_field_set(&self) -> Result<(), CatalogError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO custom_field_set (name, label)
             VALUES (?1, 'Demo Data Importer')",
            params![CUSTOM_FIELD_SET_NAME],
        )?;
        self.conn.execute(
            "INSERT OR IGNORE INTO custom_field (name, set_name, field_type, label)
             VALUES (?1, ?2, 'bool', 'Is a demo product')",
            params![IS_DEMO_PRODUCT_FIELD, CUSTOM_FIELD_SET_NAME],
        )?;
        Ok(())
    }

    /// Remove the demo-marker custom field registration.
    ///
    /// With `keep_user_data` nothing is touched, matching the plugin
    /// uninstall hook honoring the keep-user-data choice.
    pub fn uninstall(&self, keep_user_data: bool) -> Result<(), CatalogError> {
        if keep_user_data {
            return Ok(());
        }
        self.conn.execute(
            "DELETE FROM custom_field WHERE set_name = ?1",
            params![CUSTOM_FIELD_SET_NAME],
        )?;
        self.conn.execute(
            "DELETE FROM custom_field_set WHERE name = ?1",
            params![CUSTOM_FIELD_SET_NAME],
        )?;
        Ok(())
    }

    /// Whether the demo-marker custom field is registered.
    pub fn custom_field_set_installed(&self) -> Result<bool, CatalogError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM custom_field_set WHERE name = ?1",
            params![CUSTOM_FIELD_SET_NAME],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Whether any of the demo webservice credentials are configured.
    pub fn demo_credentials_exist(&self) -> Result<bool, CatalogError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM system_config WHERE configuration_key IN (?1, ?2, ?3)",
            params![
                CONFIG_KEY_API_USERNAME,
                CONFIG_KEY_API_KEY,
                CONFIG_KEY_API_SALT
            ],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Write the demo webservice credentials, replacing any present.
    pub fn seed_demo_credentials(&mut self) -> Result<(), CatalogError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM system_config WHERE configuration_key IN (?1, ?2, ?3)",
            params![
                CONFIG_KEY_API_USERNAME,
                CONFIG_KEY_API_KEY,
                CONFIG_KEY_API_SALT
            ],
        )?;

        let now = Utc::now().to_rfc3339();
        for (key, value) in [
            (CONFIG_KEY_API_USERNAME, DEMO_API_USERNAME),
            (CONFIG_KEY_API_KEY, DEMO_API_KEY),
            (CONFIG_KEY_API_SALT, DEMO_API_SALT),
        ] {
            tx.execute(
                "INSERT INTO system_config (id, configuration_key, configuration_value, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![CatalogId::generate().to_string(), key, value, now],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Read one system configuration value.
    pub fn config_value(&self, key: &str) -> Result<Option<String>, CatalogError> {
        let value = self
            .conn
            .query_row(
                "SELECT configuration_value FROM system_config WHERE configuration_key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Total number of products in the catalog.
    pub fn product_count(&self) -> Result<usize, CatalogError> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM product", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl From<rusqlite::Error> for CatalogError {
    fn from(e: rusqlite::Error) -> Self {
        CatalogError::Storage(e.to_string())
    }
}

impl ProductStore for SqliteCatalog {
    fn existing_product_numbers(
        &self,
        numbers: &[String],
    ) -> Result<HashSet<String>, CatalogError> {
        if numbers.is_empty() {
            return Ok(HashSet::new());
        }

        let placeholders = vec!["?"; numbers.len()].join(",");
        let sql = format!(
            "SELECT product_number FROM product WHERE product_number IN ({placeholders})"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(numbers.iter()), |row| {
            row.get::<_, String>(0)
        })?;

        let mut found = HashSet::new();
        for number in rows {
            found.insert(number?);
        }
        Ok(found)
    }

    fn create_products(&mut self, products: &[NewProduct]) -> Result<(), CatalogError> {
        // One transaction per batch; earlier committed batches stay in place
        // when a later batch fails.
        let tx = self.conn.transaction()?;
        let now = Utc::now().to_rfc3339();

        for product in products {
            let id = product.id.to_string();
            tx.execute(
                "INSERT INTO product (
                    id, product_number, active, tax_id, stock, shipping_free,
                    purchase_price, display_in_listing, manufacturer_number,
                    ean, top_data_id, created_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    id,
                    product.product_number,
                    product.active,
                    product.tax_id,
                    product.stock,
                    product.shipping_free,
                    product.purchase_price,
                    product.display_in_listing,
                    product.manufacturer_number,
                    product.ean,
                    product.top_data_id,
                    now,
                ],
            )?;

            tx.execute(
                "INSERT INTO product_translation (product_id, locale, name, description)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    id,
                    product.name.locale,
                    product.name.value,
                    product.description.as_ref().map(|d| d.value.as_str()),
                ],
            )?;

            tx.execute(
                "INSERT INTO product_price (product_id, currency_id, net, gross, linked)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    id,
                    product.price.currency_id,
                    product.price.net,
                    product.price.gross,
                    product.price.linked,
                ],
            )?;

            for visibility in &product.visibilities {
                tx.execute(
                    "INSERT INTO product_visibility (product_id, sales_channel_id, visibility)
                     VALUES (?1, ?2, ?3)",
                    params![id, visibility.sales_channel_id, visibility.visibility],
                )?;
            }

            if let Some(category_id) = &product.category_id {
                tx.execute(
                    "INSERT INTO product_category (product_id, category_id) VALUES (?1, ?2)",
                    params![id, category_id],
                )?;
            }

            if product.is_demo {
                tx.execute(
                    "INSERT INTO product_custom_field (product_id, field_name, value_bool)
                     VALUES (?1, ?2, 1)",
                    params![id, IS_DEMO_PRODUCT_FIELD],
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn default_tax_id(&self) -> Result<String, CatalogError> {
        let id: Option<String> = self
            .conn
            .query_row(
                "SELECT COALESCE(
                    (SELECT id FROM tax WHERE tax_rate = 19.0 LIMIT 1),
                    (SELECT id FROM tax ORDER BY rowid LIMIT 1)
                 )",
                [],
                |row| row.get(0),
            )
            .optional()?
            .flatten();

        id.ok_or_else(|| {
            CatalogError::PreconditionUnresolved(
                "no tax found, run `demodata install` to seed baseline data".to_string(),
            )
        })
    }

    fn storefront_sales_channel_id(&self) -> Result<String, CatalogError> {
        let id: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM sales_channel
                 WHERE channel_type = 'storefront'
                 ORDER BY created_at ASC
                 LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        id.ok_or_else(|| {
            CatalogError::PreconditionUnresolved("no sales channel found".to_string())
        })
    }

    fn demo_product_ids(&self) -> Result<Vec<String>, CatalogError> {
        let mut stmt = self.conn.prepare(
            "SELECT product_id FROM product_custom_field
             WHERE field_name = ?1 AND value_bool = 1",
        )?;
        let rows = stmt.query_map(params![IS_DEMO_PRODUCT_FIELD], |row| {
            row.get::<_, String>(0)
        })?;

        let mut ids = Vec::new();
        for id in rows {
            ids.push(id?);
        }
        Ok(ids)
    }

    fn delete_products(&mut self, ids: &[String]) -> Result<usize, CatalogError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.transaction()?;
        let mut deleted = 0;
        for id in ids {
            for table in [
                "product_translation",
                "product_price",
                "product_visibility",
                "product_category",
                "product_custom_field",
            ] {
                tx.execute(
                    &format!("DELETE FROM {table} WHERE product_id = ?1"),
                    params![id],
                )?;
            }
            deleted += tx.execute("DELETE FROM product WHERE id = ?1", params![id])?;
        }
        tx.commit()?;

        Ok(deleted)
    }

    fn categories(&self) -> Result<Vec<CategoryEntry>, CatalogError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, parent_id FROM category ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok(CategoryEntry {
                id: row.get(0)?,
                name: row.get(1)?,
                parent_id: row.get(2)?,
            })
        })?;

        let mut categories = Vec::new();
        for entry in rows {
            categories.push(entry?);
        }
        Ok(categories)
    }

    fn category_name(&self, id: &str) -> Result<Option<String>, CatalogError> {
        let name = self
            .conn
            .query_row(
                "SELECT name FROM category WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(name)
    }
}
