//! `DocumentsRepo` over a single `documents` table with JSONB payloads.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{Document, DocumentsRepo, RepoError},
    domain::collections::Collection,
};

use super::{PostgresDocuments, map_sqlx_error};

#[derive(FromRow)]
struct DocumentRow {
    id: Uuid,
    data: Value,
    created_at: OffsetDateTime,
    updated_at: Option<OffsetDateTime>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            data: row.data,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl DocumentsRepo for PostgresDocuments {
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, RepoError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, data, created_at, updated_at \
             FROM documents WHERE collection = $1 \
             ORDER BY created_at, id",
        )
        .bind(collection.as_str())
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn insert(
        &self,
        collection: Collection,
        data: Value,
        created_at: OffsetDateTime,
    ) -> Result<Document, RepoError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "INSERT INTO documents (id, collection, data, created_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, data, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(collection.as_str())
        .bind(data)
        .bind(created_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update(
        &self,
        collection: Collection,
        id: Uuid,
        fields: Value,
        updated_at: OffsetDateTime,
    ) -> Result<Document, RepoError> {
        // `||` merges top-level keys, preserving fields absent from the patch.
        let row = sqlx::query_as::<_, DocumentRow>(
            "UPDATE documents SET data = data || $3, updated_at = $4 \
             WHERE collection = $1 AND id = $2 \
             RETURNING id, data, created_at, updated_at",
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(fields)
        .bind(updated_at)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?
        .ok_or(RepoError::NotFound)?;

        Ok(row.into())
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepoError> {
        self.health_check().await.map_err(map_sqlx_error)
    }
}
