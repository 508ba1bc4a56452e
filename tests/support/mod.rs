//! Shared test fixtures: an in-memory documents repo with fault injection.

use std::collections::HashMap;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use serde_json::Value;
use time::OffsetDateTime;
use tokio::sync::Notify;
use uuid::Uuid;

use vetrina::application::repos::{Document, DocumentsRepo, RepoError};
use vetrina::domain::collections::Collection;

#[derive(Default)]
pub struct MemoryDocuments {
    documents: Mutex<HashMap<(Collection, Uuid), Document>>,
    offline: AtomicBool,
    failing: Mutex<Vec<Collection>>,
    gate: Mutex<Option<Arc<ReadGate>>>,
}

/// Parks the next `list` call so a test can look at mid-fetch state.
pub struct ReadGate {
    entered: Notify,
    release: Notify,
}

impl ReadGate {
    /// Resolves once a read has reached the repo and parked.
    #[allow(dead_code)]
    pub async fn reached(&self) {
        self.entered.notified().await;
    }

    /// Lets the parked read proceed.
    #[allow(dead_code)]
    pub fn open(&self) {
        self.release.notify_one();
    }
}

impl MemoryDocuments {
    /// Make every subsequent call fail as if the backend were unreachable.
    #[allow(dead_code)]
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Make reads of one collection fail while the others keep working.
    #[allow(dead_code)]
    pub fn fail_collection(&self, collection: Collection) {
        self.failing.lock().unwrap().push(collection);
    }

    #[allow(dead_code)]
    pub fn seed(&self, collection: Collection, data: Value) -> Uuid {
        let document = Document {
            id: Uuid::new_v4(),
            data,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        };
        let id = document.id;
        self.documents
            .lock()
            .unwrap()
            .insert((collection, id), document);
        id
    }

    #[allow(dead_code)]
    pub fn count(&self, collection: Collection) -> usize {
        self.documents
            .lock()
            .unwrap()
            .keys()
            .filter(|(c, _)| *c == collection)
            .count()
    }

    /// Park subsequent reads until the returned gate is opened.
    #[allow(dead_code)]
    pub fn hold_reads(&self) -> Arc<ReadGate> {
        let gate = Arc::new(ReadGate {
            entered: Notify::new(),
            release: Notify::new(),
        });
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    fn check_reachable(&self, collection: Collection) -> Result<(), RepoError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RepoError::unavailable("connection refused"));
        }
        if self.failing.lock().unwrap().contains(&collection) {
            return Err(RepoError::unavailable("connection reset"));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentsRepo for MemoryDocuments {
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, RepoError> {
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.check_reachable(collection)?;
        let documents = self.documents.lock().unwrap();
        let mut rows: Vec<Document> = documents
            .iter()
            .filter(|((c, _), _)| *c == collection)
            .map(|(_, doc)| doc.clone())
            .collect();
        rows.sort_by_key(|doc| (doc.created_at, doc.id));
        Ok(rows)
    }

    async fn insert(
        &self,
        collection: Collection,
        data: Value,
        created_at: OffsetDateTime,
    ) -> Result<Document, RepoError> {
        self.check_reachable(collection)?;
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
        self.check_reachable(collection)?;
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
        self.check_reachable(collection)?;
        self.documents
            .lock()
            .unwrap()
            .remove(&(collection, id))
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RepoError::unavailable("connection refused"));
        }
        Ok(())
    }
}
