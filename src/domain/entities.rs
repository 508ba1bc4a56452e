//! Canonical record shapes for every portfolio collection.
//!
//! Each kind serializes to one flat JSON document in the store. Historic
//! field spellings that appeared in earlier revisions of the data
//! (`issuedBy`, camelCase link names) are accepted as aliases at this
//! boundary so old documents still deserialize; they are written back in
//! the canonical spelling.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::domain::collections::Collection;

/// A record kind that lives in exactly one named collection.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: Collection;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub email: Option<String>,
}

/// Singleton record behind the landing banner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroRecord {
    pub name: String,
    pub role: String,
    pub subtitle: String,
    pub description: String,
    #[serde(alias = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(alias = "resumeUrl")]
    pub resume_url: Option<String>,
    #[serde(alias = "socialLinks")]
    pub social_links: SocialLinks,
    pub cgpa: Option<String>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    pub zoom: Option<f64>,
}

impl Entity for HeroRecord {
    const COLLECTION: Collection = Collection::Hero;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcademicDetails {
    pub ssc: Option<String>,
    pub intermediate: Option<String>,
    pub btech: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutRecord {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    #[serde(alias = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(alias = "academicDetails")]
    pub academic_details: AcademicDetails,
}

impl Entity for AboutRecord {
    const COLLECTION: Collection = Collection::About;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillRecord {
    pub name: String,
    pub category: String,
    /// Proficiency in percent, clamped to 0..=100 before any write.
    pub level: u8,
}

impl Entity for SkillRecord {
    const COLLECTION: Collection = Collection::Skills;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceRecord {
    pub role: String,
    pub company: String,
    pub description: String,
    pub skills: Vec<String>,
    #[serde(alias = "startDate")]
    pub start_date: String,
    #[serde(alias = "endDate")]
    pub end_date: Option<String>,
    /// Display string derived from the dates at write time.
    pub duration: String,
}

impl Entity for ExperienceRecord {
    const COLLECTION: Collection = Collection::Experiences;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectRecord {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    #[serde(alias = "imageUrl")]
    pub image_url: Option<String>,
    /// Comma-joined in storage, split on render.
    pub technologies: String,
    #[serde(alias = "demoLink", alias = "liveUrl")]
    pub demo_link: Option<String>,
    #[serde(alias = "githubLink", alias = "githubUrl")]
    pub github_link: Option<String>,
}

impl Entity for ProjectRecord {
    const COLLECTION: Collection = Collection::Projects;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateRecord {
    pub title: String,
    #[serde(alias = "issuedBy")]
    pub issuer: String,
    pub date: String,
    pub category: String,
    #[serde(alias = "credentialId")]
    pub credential_id: Option<String>,
    #[serde(alias = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(alias = "credentialUrl")]
    pub credential_url: Option<String>,
}

impl Entity for CertificateRecord {
    const COLLECTION: Collection = Collection::Certificates;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementRecord {
    pub title: String,
    pub date: String,
    pub description: String,
}

impl Entity for AchievementRecord {
    const COLLECTION: Collection = Collection::Achievements;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certificate_accepts_legacy_issued_by_spelling() {
        let legacy = serde_json::json!({
            "title": "React Developer Certification",
            "issuedBy": "Meta",
            "date": "2024-03",
            "category": "Frontend",
            "credentialUrl": "https://example.com/c/123"
        });

        let record: CertificateRecord = serde_json::from_value(legacy).expect("coerces");
        assert_eq!(record.issuer, "Meta");
        assert_eq!(record.credential_url.as_deref(), Some("https://example.com/c/123"));

        let written = serde_json::to_value(&record).expect("serializes");
        assert!(written.get("issuer").is_some());
        assert!(written.get("issuedBy").is_none());
    }

    #[test]
    fn unknown_fields_are_ignored_at_the_boundary() {
        let noisy = serde_json::json!({
            "name": "Rust",
            "category": "Languages",
            "level": 90,
            "icon": "code-2"
        });

        let record: SkillRecord = serde_json::from_value(noisy).expect("coerces");
        assert_eq!(record.name, "Rust");
        assert_eq!(record.level, 90);
    }

    #[test]
    fn hero_defaults_missing_optionals_to_none() {
        let sparse = serde_json::json!({ "name": "Ada" });
        let record: HeroRecord = serde_json::from_value(sparse).expect("coerces");
        assert!(record.image_url.is_none());
        assert!(record.social_links.github.is_none());
    }
}
