//! Schema introspection
//!
//! The generator reads a table's column list through [`SchemaCatalog`]. Adapters
//! exist for live databases (SQLite, PostgreSQL, MySQL/MariaDB via sqlx), for
//! offline schema files, and for in-memory tables.
//!
//! Every adapter returns columns in catalog order and reports a table without
//! columns as [`ScaffoldError::TableNotFound`].

mod file;
mod memory;
mod mysql;
mod postgres;
mod sqlite;

pub use file::SchemaFile;
pub use memory::MemoryCatalog;
pub use mysql::MySqlCatalog;
pub use postgres::PostgresCatalog;
pub use sqlite::SqliteCatalog;

use crate::error::{Result, ScaffoldError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One column as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawColumn {
    /// Column name
    pub name: String,
    /// Raw type string (e.g. `varchar(60)`, `decimal(10,2)`)
    #[serde(rename = "type")]
    pub type_string: String,
    /// Whether the column accepts null
    #[serde(default)]
    pub nullable: bool,
}

impl RawColumn {
    /// Create a raw column
    pub fn new(name: impl Into<String>, type_string: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            type_string: type_string.into(),
            nullable,
        }
    }
}

/// Source of table column metadata
#[async_trait]
pub trait SchemaCatalog: Send + Sync {
    /// List the columns of `table` in catalog order
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::TableNotFound`] if the table does not exist, or
    /// a catalog error if the backend cannot be queried.
    async fn list_columns(&self, table: &str) -> Result<Vec<RawColumn>>;
}

/// Turn an empty column list into a lookup failure
pub(crate) fn require_columns(table: &str, columns: Vec<RawColumn>) -> Result<Vec<RawColumn>> {
    if columns.is_empty() {
        Err(ScaffoldError::TableNotFound {
            table: table.to_string(),
        })
    } else {
        Ok(columns)
    }
}

/// Open a catalog from a locator
///
/// | locator                                   | adapter             |
/// |-------------------------------------------|---------------------|
/// | `sqlite:...`                              | [`SqliteCatalog`]   |
/// | `postgres://...`, `postgresql://...`      | [`PostgresCatalog`] |
/// | `mysql://...`, `mariadb://...`            | [`MySqlCatalog`]    |
/// | `*.json`, `*.toml` (optionally `file:`)   | [`SchemaFile`]      |
///
/// # Errors
///
/// Returns [`ScaffoldError::UnsupportedCatalog`] for an unknown locator, or the
/// adapter's error if the connection or file load fails.
pub async fn connect(locator: &str) -> Result<Box<dyn SchemaCatalog>> {
    let locator = locator.trim();
    tracing::debug!(locator, "Opening schema catalog");

    if locator.starts_with("sqlite:") {
        return Ok(Box::new(SqliteCatalog::connect(locator).await?));
    }
    if locator.starts_with("postgres://") || locator.starts_with("postgresql://") {
        return Ok(Box::new(PostgresCatalog::connect(locator).await?));
    }
    if locator.starts_with("mysql://") || locator.starts_with("mariadb://") {
        return Ok(Box::new(MySqlCatalog::connect(locator).await?));
    }

    let path = Path::new(locator.strip_prefix("file:").unwrap_or(locator));
    if SchemaFile::is_schema_file(path) {
        return Ok(Box::new(SchemaFile::load(path)?));
    }

    Err(ScaffoldError::UnsupportedCatalog(locator.to_string()))
}
