//! Form payloads posted by the admin panel, converted into domain records.

use serde::Deserialize;

use crate::domain::entities::{
    AboutRecord, AcademicDetails, AchievementRecord, CertificateRecord, ExperienceRecord,
    HeroRecord, ProjectRecord, SkillRecord, SocialLinks,
};

fn opt(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HeroForm {
    pub name: String,
    pub role: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: String,
    pub resume_url: String,
    pub github: String,
    pub linkedin: String,
    pub instagram: String,
    pub email: String,
    pub cgpa: String,
}

impl From<HeroForm> for HeroRecord {
    fn from(form: HeroForm) -> Self {
        HeroRecord {
            name: form.name.trim().to_string(),
            role: form.role.trim().to_string(),
            subtitle: form.subtitle.trim().to_string(),
            description: form.description.trim().to_string(),
            image_url: opt(form.image_url),
            resume_url: opt(form.resume_url),
            social_links: SocialLinks {
                github: opt(form.github),
                linkedin: opt(form.linkedin),
                instagram: opt(form.instagram),
                email: opt(form.email),
            },
            cgpa: opt(form.cgpa),
            ..HeroRecord::default()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AboutForm {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: String,
    pub ssc: String,
    pub intermediate: String,
    pub btech: String,
}

impl From<AboutForm> for AboutRecord {
    fn from(form: AboutForm) -> Self {
        AboutRecord {
            title: form.title.trim().to_string(),
            subtitle: form.subtitle.trim().to_string(),
            description: form.description.trim().to_string(),
            image_url: opt(form.image_url),
            academic_details: AcademicDetails {
                ssc: opt(form.ssc),
                intermediate: opt(form.intermediate),
                btech: opt(form.btech),
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SkillForm {
    pub name: String,
    pub category: String,
    pub level: u8,
}

impl From<SkillForm> for SkillRecord {
    fn from(form: SkillForm) -> Self {
        SkillRecord {
            name: form.name.trim().to_string(),
            category: form.category.trim().to_string(),
            level: form.level,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExperienceForm {
    pub role: String,
    pub company: String,
    pub description: String,
    /// Comma-separated in the form, stored as a list.
    pub skills: String,
    pub start_date: String,
    pub end_date: String,
}

impl From<ExperienceForm> for ExperienceRecord {
    fn from(form: ExperienceForm) -> Self {
        ExperienceRecord {
            role: form.role.trim().to_string(),
            company: form.company.trim().to_string(),
            description: form.description.trim().to_string(),
            skills: form
                .skills
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect(),
            start_date: form.start_date.trim().to_string(),
            end_date: opt(form.end_date),
            duration: String::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProjectForm {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: String,
    pub technologies: String,
    pub demo_link: String,
    pub github_link: String,
}

impl From<ProjectForm> for ProjectRecord {
    fn from(form: ProjectForm) -> Self {
        ProjectRecord {
            title: form.title.trim().to_string(),
            subtitle: form.subtitle.trim().to_string(),
            description: form.description.trim().to_string(),
            image_url: opt(form.image_url),
            technologies: form.technologies.trim().to_string(),
            demo_link: opt(form.demo_link),
            github_link: opt(form.github_link),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CertificateForm {
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub category: String,
    pub credential_id: String,
    pub credential_url: String,
    pub image_url: String,
}

impl From<CertificateForm> for CertificateRecord {
    fn from(form: CertificateForm) -> Self {
        CertificateRecord {
            title: form.title.trim().to_string(),
            issuer: form.issuer.trim().to_string(),
            date: form.date.trim().to_string(),
            category: form.category.trim().to_string(),
            credential_id: opt(form.credential_id),
            credential_url: opt(form.credential_url),
            image_url: opt(form.image_url),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AchievementForm {
    pub title: String,
    pub date: String,
    pub description: String,
}

impl From<AchievementForm> for AchievementRecord {
    fn from(form: AchievementForm) -> Self {
        AchievementRecord {
            title: form.title.trim().to_string(),
            date: form.date.trim().to_string(),
            description: form.description.trim().to_string(),
        }
    }
}
