//! SQLite catalog

use super::{require_columns, RawColumn, SchemaCatalog};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

const COLUMNS_QUERY: &str =
    r#"SELECT name, type, "notnull" FROM pragma_table_info(?1) ORDER BY cid"#;

/// Catalog reading `pragma_table_info`
///
/// The declared column type is used verbatim as the raw type string.
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    /// Connect to a SQLite database (e.g. `sqlite://./database.sqlite`)
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(url).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    #[must_use]
    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaCatalog for SqliteCatalog {
    async fn list_columns(&self, table: &str) -> Result<Vec<RawColumn>> {
        let rows = sqlx::query(COLUMNS_QUERY)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        let columns = rows
            .iter()
            .map(|row| {
                Ok(RawColumn {
                    name: row.try_get("name")?,
                    type_string: row.try_get("type")?,
                    nullable: row.try_get::<i64, _>("notnull")? == 0,
                })
            })
            .collect::<std::result::Result<Vec<_>, sqlx::Error>>()?;

        require_columns(table, columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScaffoldError;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn catalog() -> SqliteCatalog {
        // every connection to `sqlite::memory:` opens its own database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query(
            "CREATE TABLE products (
                id INTEGER NOT NULL PRIMARY KEY,
                name VARCHAR(60),
                price DECIMAL(10,2) NOT NULL,
                created_at TIMESTAMP
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        SqliteCatalog::from_pool(pool)
    }

    #[tokio::test]
    async fn test_lists_columns_in_order() {
        let columns = catalog().await.list_columns("products").await.unwrap();
        assert_eq!(
            columns,
            vec![
                RawColumn::new("id", "INTEGER", false),
                RawColumn::new("name", "VARCHAR(60)", true),
                RawColumn::new("price", "DECIMAL(10,2)", false),
                RawColumn::new("created_at", "TIMESTAMP", true),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_table() {
        let err = catalog().await.list_columns("orders").await.unwrap_err();
        assert!(matches!(err, ScaffoldError::TableNotFound { table } if table == "orders"));
    }
}
