//! In-process cache of every portfolio collection.
//!
//! The cache is loaded once at startup and kept current by the admin
//! services: successful writes splice the returned record into the cached
//! list instead of refetching the whole collection. Each section carries its
//! own loading flag and error slot, so a failed section renders as degraded
//! while the others stay usable.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    application::store::{ContentStore, StoreError, Stored},
    domain::{
        collections::Collection,
        entities::{
            AboutRecord, AchievementRecord, CertificateRecord, Entity, ExperienceRecord,
            HeroRecord, ProjectRecord, SkillRecord,
        },
    },
};

/// One cached collection: its data plus load state.
///
/// `loading` starts true and drops to false after the first load attempt,
/// successful or not. `error` holds the message of the last failed load.
#[derive(Debug, Clone)]
pub struct Section<T> {
    pub value: T,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T: Default> Default for Section<T> {
    fn default() -> Self {
        Self {
            value: T::default(),
            loading: true,
            error: None,
        }
    }
}

impl<T> Section<T> {
    fn settle_ok(&mut self, value: T) {
        self.value = value;
        self.loading = false;
        self.error = None;
    }

    fn settle_err(&mut self, err: &StoreError) {
        self.loading = false;
        self.error = Some(err.to_string());
    }
}

#[derive(Default)]
pub struct Sections {
    hero: RwLock<Section<Option<Stored<HeroRecord>>>>,
    about: RwLock<Section<Option<Stored<AboutRecord>>>>,
    skills: RwLock<Section<Vec<Stored<SkillRecord>>>>,
    experiences: RwLock<Section<Vec<Stored<ExperienceRecord>>>>,
    projects: RwLock<Section<Vec<Stored<ProjectRecord>>>>,
    certificates: RwLock<Section<Vec<Stored<CertificateRecord>>>>,
    achievements: RwLock<Section<Vec<Stored<AchievementRecord>>>>,
}

#[derive(Clone)]
pub struct PortfolioCache {
    store: ContentStore,
    sections: Arc<Sections>,
}

impl PortfolioCache {
    pub fn new(store: ContentStore) -> Self {
        Self {
            store,
            sections: Arc::new(Sections::default()),
        }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Load every collection concurrently. Sections that fail stay empty
    /// with their error recorded; the call itself never fails.
    pub async fn init(&self) {
        tokio::join!(
            self.load_singleton::<HeroRecord>(),
            self.load_singleton::<AboutRecord>(),
            self.load_list::<SkillRecord>(),
            self.load_list::<ExperienceRecord>(),
            self.load_list::<ProjectRecord>(),
            self.load_list::<CertificateRecord>(),
            self.load_list::<AchievementRecord>(),
        );
        info!("portfolio cache initialized");
    }

    /// Refetch a single collection from the store.
    pub async fn refresh(&self, collection: Collection) {
        match collection {
            Collection::Hero => self.load_singleton::<HeroRecord>().await,
            Collection::About => self.load_singleton::<AboutRecord>().await,
            Collection::Skills => self.load_list::<SkillRecord>().await,
            Collection::Experiences => self.load_list::<ExperienceRecord>().await,
            Collection::Projects => self.load_list::<ProjectRecord>().await,
            Collection::Certificates => self.load_list::<CertificateRecord>().await,
            Collection::Achievements => self.load_list::<AchievementRecord>().await,
        }
    }

    async fn load_singleton<E>(&self)
    where
        E: Entity + SingletonSlot,
    {
        // A refresh re-enters loading; readers mid-fetch see the skeleton.
        E::slot(&self.sections).write().await.loading = true;
        match self.store.fetch_all::<E>().await {
            Ok(mut records) => {
                if records.len() > 1 {
                    warn!(
                        collection = %E::COLLECTION,
                        count = records.len(),
                        "singleton collection holds multiple documents, using the first"
                    );
                }
                let first = if records.is_empty() {
                    None
                } else {
                    Some(records.remove(0))
                };
                E::slot(&self.sections).write().await.settle_ok(first);
            }
            Err(err) => {
                warn!(collection = %E::COLLECTION, error = %err, "section load failed");
                E::slot(&self.sections).write().await.settle_err(&err);
            }
        }
    }

    async fn load_list<E>(&self)
    where
        E: Entity + ListSlot,
    {
        E::slot(&self.sections).write().await.loading = true;
        match self.store.fetch_all::<E>().await {
            Ok(records) => E::slot(&self.sections).write().await.settle_ok(records),
            Err(err) => {
                warn!(collection = %E::COLLECTION, error = %err, "section load failed");
                E::slot(&self.sections).write().await.settle_err(&err);
            }
        }
    }

    /// Insert through the store, then splice the stored record into the
    /// cached list on success. Failures leave the cache untouched.
    pub async fn add<E>(&self, record: &E) -> Result<Stored<E>, StoreError>
    where
        E: Entity + ListSlot + Clone,
    {
        let stored = self.store.add(record).await?;
        E::slot(&self.sections)
            .write()
            .await
            .value
            .push(stored.clone());
        Ok(stored)
    }

    pub async fn update<E>(&self, id: Uuid, record: &E) -> Result<Stored<E>, StoreError>
    where
        E: Entity + ListSlot + Clone,
    {
        let stored = self.store.update(id, record).await?;
        let mut section = E::slot(&self.sections).write().await;
        if let Some(slot) = section.value.iter_mut().find(|entry| entry.id == id) {
            *slot = stored.clone();
        } else {
            section.value.push(stored.clone());
        }
        Ok(stored)
    }

    pub async fn delete<E>(&self, id: Uuid) -> Result<(), StoreError>
    where
        E: Entity + ListSlot,
    {
        self.store.delete(E::COLLECTION, id).await?;
        E::slot(&self.sections)
            .write()
            .await
            .value
            .retain(|entry| entry.id != id);
        Ok(())
    }

    /// Upsert the singleton record: update the existing document when one is
    /// cached, insert the first one otherwise.
    pub async fn save_singleton<E>(&self, record: &E) -> Result<Stored<E>, StoreError>
    where
        E: Entity + SingletonSlot + Clone,
    {
        let existing = E::slot(&self.sections)
            .read()
            .await
            .value
            .as_ref()
            .map(|stored| stored.id);
        let stored = match existing {
            Some(id) => self.store.update(id, record).await?,
            None => self.store.add(record).await?,
        };
        E::slot(&self.sections)
            .write()
            .await
            .settle_ok(Some(stored.clone()));
        Ok(stored)
    }

    pub async fn hero(&self) -> Section<Option<Stored<HeroRecord>>> {
        self.sections.hero.read().await.clone()
    }

    pub async fn about(&self) -> Section<Option<Stored<AboutRecord>>> {
        self.sections.about.read().await.clone()
    }

    pub async fn skills(&self) -> Section<Vec<Stored<SkillRecord>>> {
        self.sections.skills.read().await.clone()
    }

    pub async fn experiences(&self) -> Section<Vec<Stored<ExperienceRecord>>> {
        self.sections.experiences.read().await.clone()
    }

    pub async fn projects(&self) -> Section<Vec<Stored<ProjectRecord>>> {
        self.sections.projects.read().await.clone()
    }

    pub async fn certificates(&self) -> Section<Vec<Stored<CertificateRecord>>> {
        self.sections.certificates.read().await.clone()
    }

    pub async fn achievements(&self) -> Section<Vec<Stored<AchievementRecord>>> {
        self.sections.achievements.read().await.clone()
    }
}

/// Maps a singleton entity to its slot in [`Sections`].
pub trait SingletonSlot: Entity + Clone {
    fn slot(sections: &Sections) -> &RwLock<Section<Option<Stored<Self>>>>;
}

/// Maps a list entity to its slot in [`Sections`].
pub trait ListSlot: Entity {
    fn slot(sections: &Sections) -> &RwLock<Section<Vec<Stored<Self>>>>;
}

impl SingletonSlot for HeroRecord {
    fn slot(sections: &Sections) -> &RwLock<Section<Option<Stored<Self>>>> {
        &sections.hero
    }
}

impl SingletonSlot for AboutRecord {
    fn slot(sections: &Sections) -> &RwLock<Section<Option<Stored<Self>>>> {
        &sections.about
    }
}

impl ListSlot for SkillRecord {
    fn slot(sections: &Sections) -> &RwLock<Section<Vec<Stored<Self>>>> {
        &sections.skills
    }
}

impl ListSlot for ExperienceRecord {
    fn slot(sections: &Sections) -> &RwLock<Section<Vec<Stored<Self>>>> {
        &sections.experiences
    }
}

impl ListSlot for ProjectRecord {
    fn slot(sections: &Sections) -> &RwLock<Section<Vec<Stored<Self>>>> {
        &sections.projects
    }
}

impl ListSlot for CertificateRecord {
    fn slot(sections: &Sections) -> &RwLock<Section<Vec<Stored<Self>>>> {
        &sections.certificates
    }
}

impl ListSlot for AchievementRecord {
    fn slot(sections: &Sections) -> &RwLock<Section<Vec<Stored<Self>>>> {
        &sections.achievements
    }
}
