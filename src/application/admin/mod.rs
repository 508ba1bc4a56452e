//! Admin-panel write paths: validation, derived fields, and cache updates.

use thiserror::Error;
use uuid::Uuid;

use crate::{
    application::{
        cache::PortfolioCache,
        store::{StoreError, Stored},
    },
    domain::{
        collections::Collection,
        entities::{
            AboutRecord, AchievementRecord, CertificateRecord, ExperienceRecord, HeroRecord,
            ProjectRecord, SkillRecord,
        },
    },
};

#[derive(Debug, Error)]
pub enum AdminContentError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AdminContentError {
    fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// All content writes from the admin panel go through here. Each save
/// validates, derives display fields where needed, then writes through the
/// cache so the public page reflects the change immediately.
#[derive(Clone)]
pub struct AdminContentService {
    cache: PortfolioCache,
}

impl AdminContentService {
    pub fn new(cache: PortfolioCache) -> Self {
        Self { cache }
    }

    pub async fn save_hero(&self, mut record: HeroRecord) -> Result<(), AdminContentError> {
        ensure_non_empty("name", &record.name)?;
        // The admin form has no inputs for the image framing fields, so carry
        // the stored values forward rather than merging nulls over them.
        if let Some(existing) = self.cache.hero().await.value {
            record.pos_x = existing.record.pos_x;
            record.pos_y = existing.record.pos_y;
            record.zoom = existing.record.zoom;
        }
        self.cache.save_singleton(&record).await?;
        Ok(())
    }

    pub async fn save_about(&self, record: AboutRecord) -> Result<(), AdminContentError> {
        ensure_non_empty("title", &record.title)?;
        self.cache.save_singleton(&record).await?;
        Ok(())
    }

    pub async fn add_skill(
        &self,
        mut record: SkillRecord,
    ) -> Result<Stored<SkillRecord>, AdminContentError> {
        validate_skill(&mut record)?;
        Ok(self.cache.add(&record).await?)
    }

    pub async fn update_skill(
        &self,
        id: Uuid,
        mut record: SkillRecord,
    ) -> Result<Stored<SkillRecord>, AdminContentError> {
        validate_skill(&mut record)?;
        Ok(self.cache.update(id, &record).await?)
    }

    pub async fn add_experience(
        &self,
        mut record: ExperienceRecord,
    ) -> Result<Stored<ExperienceRecord>, AdminContentError> {
        validate_experience(&mut record)?;
        Ok(self.cache.add(&record).await?)
    }

    pub async fn update_experience(
        &self,
        id: Uuid,
        mut record: ExperienceRecord,
    ) -> Result<Stored<ExperienceRecord>, AdminContentError> {
        validate_experience(&mut record)?;
        Ok(self.cache.update(id, &record).await?)
    }

    pub async fn add_project(
        &self,
        record: ProjectRecord,
    ) -> Result<Stored<ProjectRecord>, AdminContentError> {
        ensure_non_empty("title", &record.title)?;
        Ok(self.cache.add(&record).await?)
    }

    pub async fn update_project(
        &self,
        id: Uuid,
        record: ProjectRecord,
    ) -> Result<Stored<ProjectRecord>, AdminContentError> {
        ensure_non_empty("title", &record.title)?;
        Ok(self.cache.update(id, &record).await?)
    }

    pub async fn add_certificate(
        &self,
        record: CertificateRecord,
    ) -> Result<Stored<CertificateRecord>, AdminContentError> {
        validate_certificate(&record)?;
        Ok(self.cache.add(&record).await?)
    }

    pub async fn update_certificate(
        &self,
        id: Uuid,
        record: CertificateRecord,
    ) -> Result<Stored<CertificateRecord>, AdminContentError> {
        validate_certificate(&record)?;
        Ok(self.cache.update(id, &record).await?)
    }

    pub async fn add_achievement(
        &self,
        record: AchievementRecord,
    ) -> Result<Stored<AchievementRecord>, AdminContentError> {
        ensure_non_empty("title", &record.title)?;
        Ok(self.cache.add(&record).await?)
    }

    pub async fn update_achievement(
        &self,
        id: Uuid,
        record: AchievementRecord,
    ) -> Result<Stored<AchievementRecord>, AdminContentError> {
        ensure_non_empty("title", &record.title)?;
        Ok(self.cache.update(id, &record).await?)
    }

    pub async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), AdminContentError> {
        match collection {
            Collection::Skills => self.cache.delete::<SkillRecord>(id).await?,
            Collection::Experiences => self.cache.delete::<ExperienceRecord>(id).await?,
            Collection::Projects => self.cache.delete::<ProjectRecord>(id).await?,
            Collection::Certificates => self.cache.delete::<CertificateRecord>(id).await?,
            Collection::Achievements => self.cache.delete::<AchievementRecord>(id).await?,
            Collection::Hero | Collection::About => {
                return Err(AdminContentError::validation(
                    "singleton sections cannot be deleted",
                ));
            }
        }
        Ok(())
    }

    pub async fn refresh(&self, collection: Collection) {
        self.cache.refresh(collection).await;
    }
}

fn ensure_non_empty(field: &str, value: &str) -> Result<(), AdminContentError> {
    if value.trim().is_empty() {
        return Err(AdminContentError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

fn validate_skill(record: &mut SkillRecord) -> Result<(), AdminContentError> {
    ensure_non_empty("name", &record.name)?;
    ensure_non_empty("category", &record.category)?;
    record.level = record.level.min(100);
    Ok(())
}

fn validate_experience(record: &mut ExperienceRecord) -> Result<(), AdminContentError> {
    ensure_non_empty("role", &record.role)?;
    ensure_non_empty("company", &record.company)?;
    ensure_non_empty("start date", &record.start_date)?;
    record.duration = derive_duration(&record.start_date, record.end_date.as_deref())?;
    Ok(())
}

fn validate_certificate(record: &CertificateRecord) -> Result<(), AdminContentError> {
    ensure_non_empty("title", &record.title)?;
    ensure_non_empty("issuer", &record.issuer)?;
    Ok(())
}

/// `YYYY-MM` month inputs into a display range such as `Jan 2022 - Present`.
fn derive_duration(start: &str, end: Option<&str>) -> Result<String, AdminContentError> {
    let start_label = format_month(start)?;
    let end_label = match end.filter(|value| !value.trim().is_empty()) {
        Some(value) => format_month(value)?,
        None => "Present".to_string(),
    };
    Ok(format!("{start_label} - {end_label}"))
}

fn format_month(value: &str) -> Result<String, AdminContentError> {
    let invalid =
        || AdminContentError::Validation(format!("`{value}` is not a month in YYYY-MM form"));
    let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: usize = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok(format!("{} {year}", MONTH_ABBREVIATIONS[month - 1]))
}
