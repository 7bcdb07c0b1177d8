//! MySQL / MariaDB catalog

use super::{require_columns, RawColumn, SchemaCatalog};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

const COLUMNS_QUERY: &str = r"
SELECT CAST(COLUMN_NAME AS CHAR) AS name,
       CAST(COLUMN_TYPE AS CHAR) AS type,
       CAST(IS_NULLABLE = 'YES' AS SIGNED) AS nullable
FROM information_schema.COLUMNS
WHERE TABLE_SCHEMA = DATABASE()
  AND TABLE_NAME = ?
ORDER BY ORDINAL_POSITION";

/// Catalog reading `information_schema.COLUMNS` of the connected database
///
/// `COLUMN_TYPE` carries the full declaration (`varchar(60)`, `int unsigned`),
/// so sizes survive into the raw type string.
#[derive(Debug, Clone)]
pub struct MySqlCatalog {
    pool: MySqlPool,
}

impl MySqlCatalog {
    /// Connect to a MySQL or MariaDB database
    ///
    /// A `mariadb://` scheme is accepted and treated as `mysql://`.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails.
    pub async fn connect(url: &str) -> Result<Self> {
        let url = url
            .strip_prefix("mariadb://")
            .map_or_else(|| url.to_string(), |rest| format!("mysql://{rest}"));
        let pool = MySqlPool::connect(&url).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    #[must_use]
    pub const fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaCatalog for MySqlCatalog {
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
                    nullable: row.try_get::<i64, _>("nullable")? != 0,
                })
            })
            .collect::<std::result::Result<Vec<_>, sqlx::Error>>()?;

        require_columns(table, columns)
    }
}
