use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

/// Marker a project uses in its `date` while it is still being built.
pub const IN_DEVELOPMENT: &str = "In Development";

static SITE_JSON: &str = include_str!("../content/site.json");

pub static SITE_CONTENT: LazyLock<SiteContent> = LazyLock::new(|| match SiteContent::load() {
    Ok(content) => content,
    Err(e) => {
        log::error!("falling back to empty site content: {e}");
        SiteContent::default()
    }
});

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Couldn't parse site content: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonProfile {
    pub name: String,
    pub role: String,
    pub location: String,
    pub phone: String,
    pub email: String,
    pub links: Vec<Link>,
}

impl PersonProfile {
    pub fn link(&self, label: &str) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.label.eq_ignore_ascii_case(label))
            .map(|l| l.url.as_str())
    }

    /// Upper-case initials of every word in the name, e.g. "SSS".
    pub fn monogram(&self) -> String {
        initials(&self.name, usize::MAX)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub tools: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "placeholder_link")]
    pub link: String,
}

impl Project {
    pub fn in_development(&self) -> bool {
        self.date.as_deref() == Some(IN_DEVELOPMENT)
    }

    pub fn status(&self) -> &'static str {
        if self.in_development() {
            "WIP"
        } else {
            "Complete"
        }
    }

    /// First letters of the first two title words.
    pub fn monogram(&self) -> String {
        initials(&self.title, 2)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub role: String,
    pub organization: String,
    pub period: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

impl ExperienceEntry {
    /// "period • location", or just the period.
    pub fn when_where(&self) -> String {
        match &self.location {
            Some(loc) => format!("{} • {}", self.period, loc),
            None => self.period.clone(),
        }
    }
}

pub type Achievement = String;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub title: String,
    #[serde(default)]
    pub issuer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    pub person: PersonProfile,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub internships: Vec<ExperienceEntry>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
}

impl SiteContent {
    pub fn load() -> Result<Self, ContentError> {
        Self::from_json(SITE_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Process-wide read-only content, parsed on first access.
pub fn site_content() -> &'static SiteContent {
    &SITE_CONTENT
}

fn placeholder_link() -> String {
    "#".to_string()
}

fn initials(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .filter_map(|w| w.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_content_parses() {
        let content = SiteContent::load().expect("embedded content should parse");
        assert_eq!(content.person.name, "Sarthak Som Singh");
        assert_eq!(content.achievements.len(), 3);
        assert_eq!(content.certifications.len(), 8);
        assert_eq!(content.projects.len(), 5);
        assert_eq!(content.internships.len(), 2);
        assert_eq!(content.experience.len(), 3);
        assert_eq!(content.skills.len(), 8);
    }

    #[test]
    fn test_lists_keep_their_order() {
        let content = SiteContent::load().unwrap();
        let titles = content
            .projects
            .iter()
            .map(|p| p.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            titles,
            vec![
                "Adventure Game",
                "HWASOO",
                "Barbaadi",
                "Timebound",
                "HEADHUNTER (In Development)"
            ]
        );
        assert_eq!(content.certifications[0].issuer.as_deref(), Some("Udemy"));
        assert_eq!(content.certifications[2].issuer.as_deref(), Some("AWS"));
    }

    #[test]
    fn test_project_status_and_monogram() {
        let content = SiteContent::load().unwrap();
        let wip = content.projects.iter().filter(|p| p.in_development()).count();
        assert_eq!(wip, 1);
        assert_eq!(content.projects[4].status(), "WIP");
        assert_eq!(content.projects[0].status(), "Complete");
        assert_eq!(content.projects[0].monogram(), "AG");
        assert_eq!(content.projects[1].monogram(), "H");
    }

    #[test]
    fn test_optional_fields_default() {
        let content = SiteContent::from_json(
            r#"{
                "person": {"name": "A B", "role": "", "location": "", "phone": "", "email": "", "links": []},
                "projects": [{"title": "Solo"}],
                "certifications": [{"title": "No issuer"}]
            }"#,
        )
        .unwrap();
        assert_eq!(content.projects[0].link, "#");
        assert!(content.projects[0].date.is_none());
        assert!(content.certifications[0].issuer.is_none());
        assert!(content.achievements.is_empty());
        assert_eq!(content.person.monogram(), "AB");
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            SiteContent::from_json("{ not json"),
            Err(ContentError::Parse(_))
        ));
    }

    #[test]
    fn test_person_links() {
        let content = SiteContent::load().unwrap();
        assert_eq!(
            content.person.link("github"),
            Some("https://github.com/sarcasm18")
        );
        assert!(content.person.link("myspace").is_none());
    }

    #[test]
    fn test_when_where() {
        let content = SiteContent::load().unwrap();
        assert_eq!(
            content.internships[0].when_where(),
            "June 2025 - July 2025 • Bangalore"
        );
        let mut entry = content.experience[0].clone();
        entry.location = None;
        assert_eq!(entry.when_where(), "October 2023 - December 2023");
    }
}
