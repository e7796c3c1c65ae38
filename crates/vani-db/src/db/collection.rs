//! Generic document collection
//!
//! Every collection table has the same shape: a store-generated `id UUID`, a `seq` identity
//! column that records insertion order, the `document JSONB` body, and `created_at` /
//! `updated_at` timestamps. Collection names are compile-time constants, never user input.

use serde::Serialize;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;
use vani_core::AppError;

use super::document::StoredDocument;

const DOCUMENT_COLUMNS: &str = "id, document, created_at, updated_at";

/// A predicate over the `document` column.
pub trait DocumentFilter {
    /// Pushes ` WHERE ...` onto `builder`, or nothing if the filter matches every document.
    /// Values must go through `push_bind`.
    fn push_predicate(&self, builder: &mut QueryBuilder<'_, Postgres>);
}

/// Filter that matches every document in a collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchAll;

impl DocumentFilter for MatchAll {
    fn push_predicate(&self, _builder: &mut QueryBuilder<'_, Postgres>) {}
}

/// Builds the list query for `collection`: filter, natural (insertion) order, limit.
pub fn select_documents<'args, F>(
    collection: &str,
    filter: &F,
    limit: i64,
) -> QueryBuilder<'args, Postgres>
where
    F: DocumentFilter + ?Sized,
{
    let mut builder = QueryBuilder::new(format!(
        "SELECT {} FROM {}",
        DOCUMENT_COLUMNS, collection
    ));
    filter.push_predicate(&mut builder);
    builder.push(" ORDER BY seq ASC LIMIT ");
    builder.push_bind(limit);
    builder
}

/// Handle on one collection table.
#[derive(Clone)]
pub struct Collection {
    pool: PgPool,
    name: &'static str,
}

impl Collection {
    pub fn new(pool: PgPool, name: &'static str) -> Self {
        Self { pool, name }
    }

    /// Insert one document and return the identifier the store assigned to it
    pub async fn insert<T>(&self, document: &T) -> Result<Uuid, AppError>
    where
        T: Serialize + Sync,
    {
        let body = serde_json::to_value(document)
            .map_err(|e| AppError::Internal(format!("Failed to encode document: {}", e)))?;

        let sql = format!(
            "INSERT INTO {} (document) VALUES ($1) RETURNING id",
            self.name
        );
        let id = sqlx::query_scalar::<Postgres, Uuid>(&sql)
            .bind(body)
            .fetch_one(&self.pool)
            .await?;

        Ok(id)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<StoredDocument>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1",
            DOCUMENT_COLUMNS, self.name
        );
        let document = sqlx::query_as::<Postgres, StoredDocument>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(document)
    }

    /// Fetch up to `limit` documents matching `filter`, in insertion order
    pub async fn find<F>(&self, filter: &F, limit: i64) -> Result<Vec<StoredDocument>, AppError>
    where
        F: DocumentFilter + Sync + ?Sized,
    {
        let mut builder = select_documents(self.name, filter, limit);
        let documents = builder
            .build_query_as::<StoredDocument>()
            .fetch_all(&self.pool)
            .await?;

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_all_has_no_where_clause() {
        let builder = select_documents("playlist", &MatchAll, 50);
        assert_eq!(
            builder.sql(),
            "SELECT id, document, created_at, updated_at FROM playlist ORDER BY seq ASC LIMIT $1"
        );
    }
}
