//! Content store gateway: the typed seam between the portfolio cache and the
//! backing document database.
//!
//! Every operation is scoped to a [`Collection`] and works on flat JSON
//! payloads. Writes stamp `created_at` on insert and `updated_at` on update;
//! updates merge top-level fields into the stored payload instead of
//! replacing it. Concurrent writers are not coordinated, the last write wins.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    application::repos::{Document, DocumentsRepo, RepoError},
    domain::{collections::Collection, entities::Entity},
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("content store unavailable: {message}")]
    Unavailable { message: String },
    #[error("no document `{id}` in collection `{collection}`")]
    NotFound { collection: Collection, id: Uuid },
    #[error("invalid payload for collection `{collection}`: {message}")]
    Invalid {
        collection: Collection,
        message: String,
    },
}

impl StoreError {
    fn invalid(collection: Collection, err: impl std::fmt::Display) -> Self {
        Self::Invalid {
            collection,
            message: err.to_string(),
        }
    }

    fn from_repo(collection: Collection, id: Option<Uuid>, err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound {
                collection,
                id: id.unwrap_or_else(Uuid::nil),
            },
            RepoError::Persistence(message) | RepoError::Unavailable(message) => {
                Self::Unavailable { message }
            }
        }
    }
}

/// A typed record together with its storage identity and timestamps.
#[derive(Debug, Clone)]
pub struct Stored<E> {
    pub id: Uuid,
    pub record: E,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Clone)]
pub struct ContentStore {
    repo: Arc<dyn DocumentsRepo>,
}

impl ContentStore {
    pub fn new(repo: Arc<dyn DocumentsRepo>) -> Self {
        Self { repo }
    }

    /// All documents in the entity's collection, decoded into `E`.
    ///
    /// Documents that fail to decode are skipped with a warning rather than
    /// failing the whole fetch, so one malformed legacy payload cannot blank
    /// an entire section.
    #[instrument(skip(self), fields(collection = %E::COLLECTION))]
    pub async fn fetch_all<E: Entity>(&self) -> Result<Vec<Stored<E>>, StoreError> {
        let collection = E::COLLECTION;
        let documents = self
            .repo
            .list(collection)
            .await
            .map_err(|err| StoreError::from_repo(collection, None, err))?;
        metrics::counter!("vetrina_store_fetches_total", "collection" => collection.as_str())
            .increment(1);

        let mut records = Vec::with_capacity(documents.len());
        for document in documents {
            match decode::<E>(document) {
                Ok(stored) => records.push(stored),
                Err(err) => {
                    tracing::warn!(%collection, error = %err, "skipping undecodable document");
                }
            }
        }
        Ok(records)
    }

    /// Insert a new record, stamping `created_at` with the current time.
    #[instrument(skip(self, record), fields(collection = %E::COLLECTION))]
    pub async fn add<E: Entity>(&self, record: &E) -> Result<Stored<E>, StoreError> {
        let collection = E::COLLECTION;
        let data =
            serde_json::to_value(record).map_err(|err| StoreError::invalid(collection, err))?;
        let document = self
            .repo
            .insert(collection, data, OffsetDateTime::now_utc())
            .await
            .map_err(|err| StoreError::from_repo(collection, None, err))?;
        metrics::counter!("vetrina_store_writes_total", "collection" => collection.as_str(), "op" => "add")
            .increment(1);
        decode(document).map_err(|err| StoreError::invalid(collection, err))
    }

    /// Merge the given top-level fields into an existing document and stamp
    /// `updated_at`. Fields absent from `fields` keep their stored values.
    #[instrument(skip(self, fields))]
    pub async fn update_fields(
        &self,
        collection: Collection,
        id: Uuid,
        fields: Value,
    ) -> Result<Document, StoreError> {
        if !fields.is_object() {
            return Err(StoreError::invalid(collection, "update payload must be an object"));
        }
        let document = self
            .repo
            .update(collection, id, fields, OffsetDateTime::now_utc())
            .await
            .map_err(|err| StoreError::from_repo(collection, Some(id), err))?;
        metrics::counter!("vetrina_store_writes_total", "collection" => collection.as_str(), "op" => "update")
            .increment(1);
        Ok(document)
    }

    /// Typed variant of [`update_fields`](Self::update_fields) which encodes
    /// the whole record, replacing every top-level field.
    pub async fn update<E: Entity>(&self, id: Uuid, record: &E) -> Result<Stored<E>, StoreError> {
        let collection = E::COLLECTION;
        let fields =
            serde_json::to_value(record).map_err(|err| StoreError::invalid(collection, err))?;
        let document = self.update_fields(collection, id, fields).await?;
        decode(document).map_err(|err| StoreError::invalid(collection, err))
    }

    /// Remove a document. Deleting an id that is already gone is an error.
    #[instrument(skip(self))]
    pub async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), StoreError> {
        self.repo
            .delete(collection, id)
            .await
            .map_err(|err| StoreError::from_repo(collection, Some(id), err))?;
        metrics::counter!("vetrina_store_writes_total", "collection" => collection.as_str(), "op" => "delete")
            .increment(1);
        Ok(())
    }

    /// Connectivity check, surfaced by the health endpoint.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.repo
            .ping()
            .await
            .map_err(|err| StoreError::from_repo(Collection::Hero, None, err))
    }
}

fn decode<E: Entity>(document: Document) -> Result<Stored<E>, serde_json::Error> {
    let record = serde_json::from_value(document.data)?;
    Ok(Stored {
        id: document.id,
        record,
        created_at: document.created_at,
        updated_at: document.updated_at,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::domain::entities::{AchievementRecord, SkillRecord};

    #[derive(Default)]
    struct MemoryRepo {
        documents: Mutex<HashMap<(Collection, Uuid), Document>>,
        unavailable: bool,
    }

    #[async_trait]
    impl DocumentsRepo for MemoryRepo {
        async fn list(&self, collection: Collection) -> Result<Vec<Document>, RepoError> {
            if self.unavailable {
                return Err(RepoError::unavailable("connection refused"));
            }
            let documents = self.documents.lock().unwrap();
            let mut rows: Vec<Document> = documents
                .iter()
                .filter(|((c, _), _)| *c == collection)
                .map(|(_, doc)| doc.clone())
                .collect();
            rows.sort_by_key(|doc| doc.created_at);
            Ok(rows)
        }

        async fn insert(
            &self,
            collection: Collection,
            data: Value,
            created_at: OffsetDateTime,
        ) -> Result<Document, RepoError> {
            if self.unavailable {
                return Err(RepoError::unavailable("connection refused"));
            }
            let document = Document {
                id: Uuid::new_v4(),
                data,
                created_at,
                updated_at: None,
            };
            self.documents
                .lock()
                .unwrap()
                .insert((collection, document.id), document.clone());
            Ok(document)
        }

        async fn update(
            &self,
            collection: Collection,
            id: Uuid,
            fields: Value,
            updated_at: OffsetDateTime,
        ) -> Result<Document, RepoError> {
            let mut documents = self.documents.lock().unwrap();
            let document = documents
                .get_mut(&(collection, id))
                .ok_or(RepoError::NotFound)?;
            if let (Some(existing), Some(incoming)) =
                (document.data.as_object_mut(), fields.as_object())
            {
                for (key, value) in incoming {
                    existing.insert(key.clone(), value.clone());
                }
            }
            document.updated_at = Some(updated_at);
            Ok(document.clone())
        }

        async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), RepoError> {
            self.documents
                .lock()
                .unwrap()
                .remove(&(collection, id))
                .map(|_| ())
                .ok_or(RepoError::NotFound)
        }

        async fn ping(&self) -> Result<(), RepoError> {
            Ok(())
        }
    }

    fn store() -> (ContentStore, Arc<MemoryRepo>) {
        let repo = Arc::new(MemoryRepo::default());
        (ContentStore::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn add_stamps_created_at_and_returns_id() {
        let (store, _) = store();
        let skill = SkillRecord {
            name: "Rust".into(),
            category: "Languages".into(),
            level: 80,
        };

        let stored = store.add(&skill).await.unwrap();

        assert_eq!(stored.record.name, "Rust");
        assert!(stored.updated_at.is_none());
        let all: Vec<Stored<SkillRecord>> = store.fetch_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, stored.id);
    }

    #[tokio::test]
    async fn update_merges_fields_and_stamps_updated_at() {
        let (store, _) = store();
        let stored = store
            .add(&SkillRecord {
                name: "Rust".into(),
                category: "Languages".into(),
                level: 80,
            })
            .await
            .unwrap();

        store
            .update_fields(Collection::Skills, stored.id, json!({ "level": 95 }))
            .await
            .unwrap();

        let all: Vec<Stored<SkillRecord>> = store.fetch_all().await.unwrap();
        assert_eq!(all[0].record.level, 95);
        assert_eq!(all[0].record.name, "Rust");
        assert!(all[0].updated_at.is_some());
    }

    #[tokio::test]
    async fn update_of_missing_document_is_not_found() {
        let (store, _) = store();
        let id = Uuid::new_v4();

        let err = store
            .update_fields(Collection::Projects, id, json!({ "title": "x" }))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound { id: missing, .. } if missing == id));
    }

    #[tokio::test]
    async fn delete_twice_fails_cleanly() {
        let (store, _) = store();
        let stored = store
            .add(&AchievementRecord {
                title: "Winner".into(),
                date: "2024".into(),
                description: String::new(),
            })
            .await
            .unwrap();

        store
            .delete(Collection::Achievements, stored.id)
            .await
            .unwrap();
        let err = store
            .delete(Collection::Achievements, stored.id)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn unreachable_backend_maps_to_unavailable() {
        let repo = Arc::new(MemoryRepo {
            unavailable: true,
            ..MemoryRepo::default()
        });
        let store = ContentStore::new(repo);

        let err = store.fetch_all::<SkillRecord>().await.unwrap_err();

        assert!(matches!(err, StoreError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn undecodable_documents_are_skipped() {
        let (store, repo) = store();
        store
            .add(&SkillRecord {
                name: "Rust".into(),
                category: "Languages".into(),
                level: 80,
            })
            .await
            .unwrap();
        repo.documents.lock().unwrap().insert(
            (Collection::Skills, Uuid::new_v4()),
            Document {
                id: Uuid::new_v4(),
                data: json!({ "level": "not a number" }),
                created_at: OffsetDateTime::now_utc(),
                updated_at: None,
            },
        );

        let all: Vec<Stored<SkillRecord>> = store.fetch_all().await.unwrap();

        assert_eq!(all.len(), 1);
    }
}
