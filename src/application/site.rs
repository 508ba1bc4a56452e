//! Assembles the public-page content from the cache.
//!
//! Singleton sections fall back to hard-coded defaults when the store holds
//! no document yet, so a freshly provisioned site renders a complete page
//! instead of empty sections.

use crate::{
    application::{
        cache::{PortfolioCache, Section},
        store::Stored,
    },
    domain::entities::{
        AboutRecord, AchievementRecord, CertificateRecord, ExperienceRecord, HeroRecord,
        ProjectRecord, SkillRecord, SocialLinks,
    },
};

/// Everything the public page needs, one snapshot per section.
pub struct SiteContent {
    pub hero: SectionContent<HeroRecord>,
    pub about: SectionContent<AboutRecord>,
    pub skills: SectionContent<Vec<SkillGroup>>,
    pub experiences: SectionContent<Vec<Stored<ExperienceRecord>>>,
    pub projects: SectionContent<Vec<Stored<ProjectRecord>>>,
    pub certificates: SectionContent<Vec<Stored<CertificateRecord>>>,
    pub achievements: SectionContent<Vec<Stored<AchievementRecord>>>,
}

pub struct SectionContent<T> {
    pub value: T,
    pub loading: bool,
    pub degraded: bool,
}

/// Skills bucketed by their category label, in first-seen order.
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<SkillRecord>,
}

pub async fn assemble(cache: &PortfolioCache) -> SiteContent {
    let hero = cache.hero().await;
    let about = cache.about().await;
    let skills = cache.skills().await;
    let experiences = cache.experiences().await;
    let projects = cache.projects().await;
    let certificates = cache.certificates().await;
    let achievements = cache.achievements().await;

    SiteContent {
        hero: singleton_content(hero, default_hero),
        about: singleton_content(about, default_about),
        skills: SectionContent {
            value: group_skills(&skills.value),
            loading: skills.loading,
            degraded: skills.error.is_some(),
        },
        experiences: list_content(experiences),
        projects: list_content(projects),
        certificates: list_content(certificates),
        achievements: list_content(achievements),
    }
}

fn singleton_content<T: Clone>(
    section: Section<Option<Stored<T>>>,
    fallback: fn() -> T,
) -> SectionContent<T> {
    let degraded = section.error.is_some();
    let value = match section.value {
        Some(stored) => stored.record,
        None => fallback(),
    };
    SectionContent {
        value,
        loading: section.loading,
        degraded,
    }
}

fn list_content<T>(section: Section<Vec<Stored<T>>>) -> SectionContent<Vec<Stored<T>>> {
    SectionContent {
        degraded: section.error.is_some(),
        loading: section.loading,
        value: section.value,
    }
}

pub fn group_skills(skills: &[Stored<SkillRecord>]) -> Vec<SkillGroup> {
    let mut groups: Vec<SkillGroup> = Vec::new();
    for stored in skills {
        let record = stored.record.clone();
        match groups
            .iter_mut()
            .find(|group| group.category == record.category)
        {
            Some(group) => group.skills.push(record),
            None => groups.push(SkillGroup {
                category: record.category.clone(),
                skills: vec![record],
            }),
        }
    }
    groups
}

/// Comma-joined technology string into trimmed entries for badges.
pub fn split_technologies(technologies: &str) -> Vec<String> {
    technologies
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn default_hero() -> HeroRecord {
    HeroRecord {
        name: "Nelavalli Phanindra".to_string(),
        role: "Computer Science Engineering Student".to_string(),
        subtitle: "Building real-world tech for real-world impact.".to_string(),
        description: "Computer Science Engineering student passionate about AI, ML, \
                      and mobile development. Turning innovative ideas into impactful solutions."
            .to_string(),
        social_links: SocialLinks {
            github: Some("https://github.com/Phanindra-Nelavalli".to_string()),
            linkedin: Some("https://linkedin.com/in/Nelavalli-Phanindra".to_string()),
            instagram: None,
            email: Some("nelavalliphanindra4@gmail.com".to_string()),
        },
        cgpa: Some("9.42".to_string()),
        ..HeroRecord::default()
    }
}

pub fn default_about() -> AboutRecord {
    AboutRecord {
        title: "About Me".to_string(),
        subtitle: "B.Tech in Computer Science, Vishnu Institute of Technology".to_string(),
        description: "I'm an enthusiastic Computer Science Engineering student with a solid \
                      understanding of software development, web, and mobile application \
                      development. My passion lies in exploring new technologies, especially \
                      Machine Learning (ML) and Artificial Intelligence (AI)."
            .to_string(),
        ..AboutRecord::default()
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::*;

    fn stored(record: SkillRecord) -> Stored<SkillRecord> {
        Stored {
            id: Uuid::new_v4(),
            record,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        }
    }

    #[test]
    fn skills_group_by_category_in_first_seen_order() {
        let skills = vec![
            stored(SkillRecord {
                name: "Rust".into(),
                category: "Languages".into(),
                level: 90,
            }),
            stored(SkillRecord {
                name: "Docker".into(),
                category: "Tools".into(),
                level: 70,
            }),
            stored(SkillRecord {
                name: "Python".into(),
                category: "Languages".into(),
                level: 85,
            }),
        ];

        let groups = group_skills(&skills);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Languages");
        assert_eq!(groups[0].skills.len(), 2);
        assert_eq!(groups[1].category, "Tools");
    }

    #[test]
    fn technologies_split_trims_and_drops_empties() {
        let parts = split_technologies("React, Firebase,, Tailwind ");
        assert_eq!(parts, vec!["React", "Firebase", "Tailwind"]);
    }

    #[test]
    fn missing_hero_falls_back_to_defaults() {
        let section = Section {
            value: None::<Stored<HeroRecord>>,
            loading: false,
            error: None,
        };

        let content = singleton_content(section, default_hero);

        assert_eq!(content.value.name, "Nelavalli Phanindra");
        assert_eq!(content.value.cgpa.as_deref(), Some("9.42"));
        assert!(!content.degraded);
    }
}
