//! PostgreSQL catalog

use super::{require_columns, RawColumn, SchemaCatalog};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Row};

const COLUMNS_QUERY: &str = r"
SELECT a.attname::text AS name,
       format_type(a.atttypid, a.atttypmod) AS type,
       NOT a.attnotnull AS nullable
FROM pg_attribute a
JOIN pg_class c ON c.oid = a.attrelid
JOIN pg_namespace n ON n.oid = c.relnamespace
WHERE c.relname = $1
  AND n.nspname = current_schema()
  AND a.attnum > 0
  AND NOT a.attisdropped
ORDER BY a.attnum";

/// Catalog reading `pg_attribute` in the current schema
///
/// Types come from `format_type`, with the long SQL spellings rewritten to the
/// short keywords the type mapper knows (`character varying(60)` becomes
/// `varchar(60)`).
#[derive(Debug, Clone)]
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    /// Connect to a PostgreSQL database
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPool::connect(url).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Rewrite `format_type` output into a short type keyword
fn canonical_type(formatted: &str) -> String {
    const SPELLINGS: [(&str, &str); 3] = [
        ("character varying", "varchar"),
        ("character", "char"),
        ("double precision", "double"),
    ];

    for (long, short) in SPELLINGS {
        if let Some(rest) = formatted.strip_prefix(long) {
            return format!("{short}{rest}");
        }
    }
    formatted.to_string()
}

#[async_trait]
impl SchemaCatalog for PostgresCatalog {
    async fn list_columns(&self, table: &str) -> Result<Vec<RawColumn>> {
        let rows = sqlx::query(COLUMNS_QUERY)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        let columns = rows
            .iter()
            .map(|row| {
                let formatted: String = row.try_get("type")?;
                Ok(RawColumn {
                    name: row.try_get("name")?,
                    type_string: canonical_type(&formatted),
                    nullable: row.try_get("nullable")?,
                })
            })
            .collect::<std::result::Result<Vec<_>, sqlx::Error>>()?;

        require_columns(table, columns)
    }
}
