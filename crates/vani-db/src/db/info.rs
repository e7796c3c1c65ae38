//! Store introspection used by the diagnostics endpoint

use anyhow::{Context, Result};
use sqlx::{PgPool, Postgres};

/// Read-only queries about the database itself.
#[derive(Clone)]
pub struct DatabaseInfoRepository {
    pool: PgPool,
}

impl DatabaseInfoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn database_name(&self) -> Result<String> {
        sqlx::query_scalar::<Postgres, String>("SELECT current_database()")
            .fetch_one(&self.pool)
            .await
            .context("Failed to read database name")
    }

    /// Collection tables in the public schema, excluding migration bookkeeping.
    #[tracing::instrument(skip(self), fields(db.operation = "list_collections"))]
    pub async fn collection_names(&self, limit: i64) -> Result<Vec<String>> {
        sqlx::query_scalar::<Postgres, String>(
            r#"
            SELECT table_name::text
            FROM information_schema.tables
            WHERE table_schema = 'public'
              AND table_type = 'BASE TABLE'
              AND table_name NOT LIKE '\_sqlx%'
            ORDER BY table_name
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list collections")
    }
}
