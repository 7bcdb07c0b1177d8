//! In-memory catalog

use super::{require_columns, RawColumn, SchemaCatalog};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Catalog backed by a map of table name to columns
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    tables: HashMap<String, Vec<RawColumn>>,
}

impl MemoryCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table from `(name, type, nullable)` triples
    #[must_use]
    pub fn with_table(mut self, table: &str, columns: &[(&str, &str, bool)]) -> Self {
        let columns = columns
            .iter()
            .map(|(name, type_string, nullable)| RawColumn::new(*name, *type_string, *nullable))
            .collect();
        self.insert(table, columns);
        self
    }

    /// Insert or replace a table
    pub fn insert(&mut self, table: impl Into<String>, columns: Vec<RawColumn>) {
        self.tables.insert(table.into(), columns);
    }
}

impl From<HashMap<String, Vec<RawColumn>>> for MemoryCatalog {
    fn from(tables: HashMap<String, Vec<RawColumn>>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl SchemaCatalog for MemoryCatalog {
    async fn list_columns(&self, table: &str) -> Result<Vec<RawColumn>> {
        let columns = self.tables.get(table).cloned().unwrap_or_default();
        require_columns(table, columns)
    }
}
