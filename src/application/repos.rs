//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::collections::Collection;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("store unreachable: {0}")]
    Unavailable(String),
    #[error("resource not found")]
    NotFound,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }

    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// One stored document: an opaque id plus the flat JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub data: Value,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

/// Collection-scoped CRUD against the backing document database.
///
/// `update` merges the supplied fields into the existing payload (shallow,
/// top-level keys) rather than replacing it, mirroring the partial-update
/// contract of the store. `delete` of a missing id is an error, not a no-op.
#[async_trait]
pub trait DocumentsRepo: Send + Sync {
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, RepoError>;

    async fn insert(
        &self,
        collection: Collection,
        data: Value,
        created_at: OffsetDateTime,
    ) -> Result<Document, RepoError>;

    async fn update(
        &self,
        collection: Collection,
        id: Uuid,
        fields: Value,
        updated_at: OffsetDateTime,
    ) -> Result<Document, RepoError>;

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), RepoError>;

    /// Connectivity check for the health endpoint.
    async fn ping(&self) -> Result<(), RepoError>;
}
