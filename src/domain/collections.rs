//! Named collections backing every portfolio section.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named, unordered set of records of one entity kind in the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Hero,
    About,
    Skills,
    Experiences,
    Projects,
    Certificates,
    Achievements,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Hero,
        Collection::About,
        Collection::Skills,
        Collection::Experiences,
        Collection::Projects,
        Collection::Certificates,
        Collection::Achievements,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Hero => "hero",
            Collection::About => "about",
            Collection::Skills => "skills",
            Collection::Experiences => "experiences",
            Collection::Projects => "projects",
            Collection::Certificates => "certificates",
            Collection::Achievements => "achievements",
        }
    }

    pub fn parse(value: &str) -> Option<Collection> {
        Collection::ALL
            .into_iter()
            .find(|collection| collection.as_str() == value)
    }

    /// Collections for which only one record is meaningful at a time.
    pub fn is_singleton(self) -> bool {
        matches!(self, Collection::Hero | Collection::About)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_collection() {
        for collection in Collection::ALL {
            assert_eq!(Collection::parse(collection.as_str()), Some(collection));
        }
        assert_eq!(Collection::parse("posts"), None);
    }

    #[test]
    fn only_hero_and_about_are_singletons() {
        let singletons: Vec<_> = Collection::ALL
            .into_iter()
            .filter(|c| c.is_singleton())
            .collect();
        assert_eq!(singletons, vec![Collection::Hero, Collection::About]);
    }
}
