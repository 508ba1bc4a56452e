//! Admin panel templates and view models.

use askama::Template;

use crate::application::{cache::PortfolioCache, store::Stored};
use crate::domain::entities::{
    AboutRecord, AchievementRecord, CertificateRecord, ExperienceRecord, HeroRecord,
    ProjectRecord, SkillRecord,
};

#[derive(Clone)]
pub struct FlashView {
    pub kind: &'static str,
    pub message: String,
}

impl FlashView {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: "success",
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: "error",
            message: message.into(),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct AdminLoginTemplate {
    pub error: Option<String>,
}

/// Singleton forms are prefilled with the stored record or blanks.
#[derive(Default)]
pub struct HeroFormView {
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

#[derive(Default)]
pub struct AboutFormView {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: String,
    pub ssc: String,
    pub intermediate: String,
    pub btech: String,
}

pub struct SkillRowView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub level: u8,
}

pub struct ExperienceRowView {
    pub id: String,
    pub role: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub duration: String,
    pub description: String,
    pub skills_csv: String,
}

pub struct ProjectRowView {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: String,
    pub technologies: String,
    pub demo_link: String,
    pub github_link: String,
}

pub struct CertificateRowView {
    pub id: String,
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub category: String,
    pub credential_id: String,
    pub credential_url: String,
    pub image_url: String,
}

pub struct AchievementRowView {
    pub id: String,
    pub title: String,
    pub date: String,
    pub description: String,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct AdminDashboardTemplate {
    pub flash: Option<FlashView>,
    pub hero: HeroFormView,
    pub about: AboutFormView,
    pub skills: Vec<SkillRowView>,
    pub experiences: Vec<ExperienceRowView>,
    pub projects: Vec<ProjectRowView>,
    pub certificates: Vec<CertificateRowView>,
    pub achievements: Vec<AchievementRowView>,
    pub degraded_sections: Vec<String>,
}

impl AdminDashboardTemplate {
    pub async fn from_cache(cache: &PortfolioCache, flash: Option<FlashView>) -> Self {
        let hero = cache.hero().await;
        let about = cache.about().await;
        let skills = cache.skills().await;
        let experiences = cache.experiences().await;
        let projects = cache.projects().await;
        let certificates = cache.certificates().await;
        let achievements = cache.achievements().await;

        let mut degraded_sections = Vec::new();
        for (name, degraded) in [
            ("hero", hero.error.is_some()),
            ("about", about.error.is_some()),
            ("skills", skills.error.is_some()),
            ("experiences", experiences.error.is_some()),
            ("projects", projects.error.is_some()),
            ("certificates", certificates.error.is_some()),
            ("achievements", achievements.error.is_some()),
        ] {
            if degraded {
                degraded_sections.push(name.to_string());
            }
        }

        Self {
            flash,
            hero: hero
                .value
                .map(|stored| hero_form(stored.record))
                .unwrap_or_default(),
            about: about
                .value
                .map(|stored| about_form(stored.record))
                .unwrap_or_default(),
            skills: skills.value.into_iter().map(skill_row).collect(),
            experiences: experiences.value.into_iter().map(experience_row).collect(),
            projects: projects.value.into_iter().map(project_row).collect(),
            certificates: certificates.value.into_iter().map(certificate_row).collect(),
            achievements: achievements.value.into_iter().map(achievement_row).collect(),
            degraded_sections,
        }
    }
}

fn hero_form(record: HeroRecord) -> HeroFormView {
    HeroFormView {
        name: record.name,
        role: record.role,
        subtitle: record.subtitle,
        description: record.description,
        image_url: record.image_url.unwrap_or_default(),
        resume_url: record.resume_url.unwrap_or_default(),
        github: record.social_links.github.unwrap_or_default(),
        linkedin: record.social_links.linkedin.unwrap_or_default(),
        instagram: record.social_links.instagram.unwrap_or_default(),
        email: record.social_links.email.unwrap_or_default(),
        cgpa: record.cgpa.unwrap_or_default(),
    }
}

fn about_form(record: AboutRecord) -> AboutFormView {
    AboutFormView {
        title: record.title,
        subtitle: record.subtitle,
        description: record.description,
        image_url: record.image_url.unwrap_or_default(),
        ssc: record.academic_details.ssc.unwrap_or_default(),
        intermediate: record.academic_details.intermediate.unwrap_or_default(),
        btech: record.academic_details.btech.unwrap_or_default(),
    }
}

fn skill_row(stored: Stored<SkillRecord>) -> SkillRowView {
    SkillRowView {
        id: stored.id.to_string(),
        name: stored.record.name,
        category: stored.record.category,
        level: stored.record.level,
    }
}

fn experience_row(stored: Stored<ExperienceRecord>) -> ExperienceRowView {
    let record = stored.record;
    ExperienceRowView {
        id: stored.id.to_string(),
        role: record.role,
        company: record.company,
        start_date: record.start_date,
        end_date: record.end_date.unwrap_or_default(),
        duration: record.duration,
        description: record.description,
        skills_csv: record.skills.join(", "),
    }
}

fn project_row(stored: Stored<ProjectRecord>) -> ProjectRowView {
    let record = stored.record;
    ProjectRowView {
        id: stored.id.to_string(),
        title: record.title,
        subtitle: record.subtitle,
        description: record.description,
        image_url: record.image_url.unwrap_or_default(),
        technologies: record.technologies,
        demo_link: record.demo_link.unwrap_or_default(),
        github_link: record.github_link.unwrap_or_default(),
    }
}

fn certificate_row(stored: Stored<CertificateRecord>) -> CertificateRowView {
    let record = stored.record;
    CertificateRowView {
        id: stored.id.to_string(),
        title: record.title,
        issuer: record.issuer,
        date: record.date,
        category: record.category,
        credential_id: record.credential_id.unwrap_or_default(),
        credential_url: record.credential_url.unwrap_or_default(),
        image_url: record.image_url.unwrap_or_default(),
    }
}

fn achievement_row(stored: Stored<AchievementRecord>) -> AchievementRowView {
    AchievementRowView {
        id: stored.id.to_string(),
        title: stored.record.title,
        date: stored.record.date,
        description: stored.record.description,
    }
}
