use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::application::{
    error::{ErrorReport, HttpError},
    site::{SiteContent, split_technologies},
    store::Stored,
};
use crate::domain::entities::{
    AchievementRecord, CertificateRecord, ExperienceRecord, ProjectRecord,
};

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response() -> Response {
    let template = ErrorTemplate {
        title: "Page Not Found".to_string(),
        message: "The page you requested does not exist.".to_string(),
    };
    let mut response = render_template_response(template, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

/// Load state of one page section, driving skeleton and degraded banners.
pub struct SectionStatusView {
    pub loading: bool,
    pub degraded: bool,
}

pub struct HeroView {
    pub name: String,
    pub role: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: Option<String>,
    pub resume_url: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub email: Option<String>,
    pub cgpa: Option<String>,
}

pub struct AboutView {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: Option<String>,
    pub ssc: Option<String>,
    pub intermediate: Option<String>,
    pub btech: Option<String>,
}

pub struct SkillView {
    pub name: String,
    pub level: u8,
}

pub struct SkillGroupView {
    pub category: String,
    pub skills: Vec<SkillView>,
}

pub struct ExperienceView {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub description: String,
    pub skills: Vec<String>,
}

pub struct ProjectView {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: Option<String>,
    pub technologies: Vec<String>,
    pub demo_link: Option<String>,
    pub github_link: Option<String>,
}

pub struct CertificateView {
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub category: String,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub image_url: Option<String>,
}

pub struct AchievementView {
    pub title: String,
    pub date: String,
    pub description: String,
}

pub struct PageContext {
    pub hero: HeroView,
    pub hero_status: SectionStatusView,
    pub about: AboutView,
    pub about_status: SectionStatusView,
    pub skill_groups: Vec<SkillGroupView>,
    pub skills_status: SectionStatusView,
    pub experiences: Vec<ExperienceView>,
    pub experiences_status: SectionStatusView,
    pub projects: Vec<ProjectView>,
    pub projects_status: SectionStatusView,
    pub certificates: Vec<CertificateView>,
    pub certificates_status: SectionStatusView,
    pub achievements: Vec<AchievementView>,
    pub achievements_status: SectionStatusView,
}

impl PageContext {
    pub fn from_content(content: SiteContent) -> Self {
        let hero = content.hero.value;
        let about = content.about.value;
        Self {
            hero_status: status(content.hero.loading, content.hero.degraded),
            hero: HeroView {
                name: hero.name,
                role: hero.role,
                subtitle: hero.subtitle,
                description: hero.description,
                image_url: hero.image_url,
                resume_url: hero.resume_url,
                github: hero.social_links.github,
                linkedin: hero.social_links.linkedin,
                instagram: hero.social_links.instagram,
                email: hero.social_links.email,
                cgpa: hero.cgpa,
            },
            about_status: status(content.about.loading, content.about.degraded),
            about: AboutView {
                title: about.title,
                subtitle: about.subtitle,
                description: about.description,
                image_url: about.image_url,
                ssc: about.academic_details.ssc,
                intermediate: about.academic_details.intermediate,
                btech: about.academic_details.btech,
            },
            skills_status: status(content.skills.loading, content.skills.degraded),
            skill_groups: content
                .skills
                .value
                .into_iter()
                .map(|group| SkillGroupView {
                    category: group.category,
                    skills: group
                        .skills
                        .into_iter()
                        .map(|skill| SkillView {
                            name: skill.name,
                            level: skill.level,
                        })
                        .collect(),
                })
                .collect(),
            experiences_status: status(content.experiences.loading, content.experiences.degraded),
            experiences: content
                .experiences
                .value
                .into_iter()
                .map(experience_view)
                .collect(),
            projects_status: status(content.projects.loading, content.projects.degraded),
            projects: content.projects.value.into_iter().map(project_view).collect(),
            certificates_status: status(
                content.certificates.loading,
                content.certificates.degraded,
            ),
            certificates: content
                .certificates
                .value
                .into_iter()
                .map(certificate_view)
                .collect(),
            achievements_status: status(
                content.achievements.loading,
                content.achievements.degraded,
            ),
            achievements: content
                .achievements
                .value
                .into_iter()
                .map(achievement_view)
                .collect(),
        }
    }
}

fn status(loading: bool, degraded: bool) -> SectionStatusView {
    SectionStatusView { loading, degraded }
}

fn experience_view(stored: Stored<ExperienceRecord>) -> ExperienceView {
    let record = stored.record;
    ExperienceView {
        role: record.role,
        company: record.company,
        duration: record.duration,
        description: record.description,
        skills: record.skills,
    }
}

fn project_view(stored: Stored<ProjectRecord>) -> ProjectView {
    let record = stored.record;
    ProjectView {
        title: record.title,
        subtitle: record.subtitle,
        description: record.description,
        image_url: record.image_url,
        technologies: split_technologies(&record.technologies),
        demo_link: record.demo_link,
        github_link: record.github_link,
    }
}

fn certificate_view(stored: Stored<CertificateRecord>) -> CertificateView {
    let record = stored.record;
    CertificateView {
        title: record.title,
        issuer: record.issuer,
        date: record.date,
        category: record.category,
        credential_id: record.credential_id,
        credential_url: record.credential_url,
        image_url: record.image_url,
    }
}

fn achievement_view(stored: Stored<AchievementRecord>) -> AchievementView {
    let record = stored.record;
    AchievementView {
        title: record.title,
        date: record.date,
        description: record.description,
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: PageContext,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}
