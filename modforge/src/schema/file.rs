//! Offline schema files
//!
//! A schema file lists tables and their columns in catalog order, as JSON:
//!
//! ```json
//! { "tables": { "products": [
//!     { "name": "id", "type": "int" },
//!     { "name": "name", "type": "varchar(60)", "nullable": true }
//! ] } }
//! ```
//!
//! or TOML:
//!
//! ```toml
//! [[tables.products]]
//! name = "id"
//! type = "int"
//!
//! [[tables.products]]
//! name = "name"
//! type = "varchar(60)"
//! nullable = true
//! ```

use super::{require_columns, RawColumn, SchemaCatalog};
use crate::error::{Result, ScaffoldError};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    #[serde(default)]
    tables: HashMap<String, Vec<RawColumn>>,
}

/// Catalog loaded from a JSON or TOML schema file
#[derive(Debug, Clone)]
pub struct SchemaFile {
    path: PathBuf,
    tables: HashMap<String, Vec<RawColumn>>,
}

impl SchemaFile {
    /// Whether `path` has a supported schema file extension
    #[must_use]
    pub fn is_schema_file(path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("toml"))
    }

    /// Load a schema file
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::SchemaFile`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ScaffoldError::SchemaFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        Self::parse(path, &content, is_toml)
    }

    fn parse(path: &Path, content: &str, is_toml: bool) -> Result<Self> {
        let document: SchemaDocument = if is_toml {
            toml::from_str::<SchemaDocument>(content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str::<SchemaDocument>(content).map_err(|e| e.to_string())
        }
        .map_err(|reason| ScaffoldError::SchemaFile {
            path: path.to_path_buf(),
            reason,
        })?;

        tracing::debug!(
            path = %path.display(),
            tables = document.tables.len(),
            "Loaded schema file"
        );

        Ok(Self {
            path: path.to_path_buf(),
            tables: document.tables,
        })
    }

    /// Path the schema was loaded from
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SchemaCatalog for SchemaFile {
    async fn list_columns(&self, table: &str) -> Result<Vec<RawColumn>> {
        let columns = self.tables.get(table).cloned().unwrap_or_default();
        require_columns(table, columns)
    }
}
