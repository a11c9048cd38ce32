//! Page content: everything personal about the page lives here, so a
//! different person only needs a different JSON document.

use crate::config::MotionConfig;
use serde::Deserialize;
use thiserror::Error;

const BUILTIN_CONTENT: &str = include_str!("../content/profile.json");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("skill `{name}` has level {level}, expected 0-100")]
    SkillLevelOutOfRange { name: String, level: u8 },
    #[error("project `{title}` lists no technologies")]
    ProjectWithoutTags { title: String },
    #[error("display name is empty")]
    EmptyName,
    #[error("palette defines no particle colors")]
    EmptyParticlePalette,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    pub name: String,
    pub initials: String,
    pub badge: String,
    pub headline: Headline,
    pub subtitle: String,
    pub hero_image: Image,
    pub stats: Vec<Stat>,
    pub about: About,
    pub skills: Vec<SkillEntry>,
    pub tech_stack: Vec<String>,
    pub projects_intro: String,
    pub projects: Vec<ProjectEntry>,
    pub contact: Contact,
    pub footer_tagline: String,
    pub palette: Palette,
    #[serde(default)]
    pub motion: MotionConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Headline {
    pub lead: String,
    pub highlight: String,
    pub connector: String,
    pub highlight_alt: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Stat {
    pub number: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub title_lead: String,
    pub title_highlight: String,
    pub image: Image,
    pub paragraphs: Vec<String>,
    pub highlights: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    pub level: u8,
    pub icon: String,
}

impl SkillEntry {
    /// Fraction of the progress arc this skill fills once animated.
    pub fn fill_fraction(&self) -> f64 {
        f64::from(self.level.min(100)) / 100.0
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProjectEntry {
    pub image: String,
    pub title: String,
    pub description: String,
    pub tech: Vec<String>,
    pub link: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Contact {
    pub intro: String,
    pub links: Vec<ContactLink>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ContactLink {
    pub href: String,
    pub label: String,
    pub icon: String,
    pub kind: ContactKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Email,
    Phone,
    Profile,
}

impl ContactKind {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Email => "email-btn",
            Self::Phone => "phone-btn",
            Self::Profile => "profile-btn",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub highlight: String,
    pub particles: Vec<String>,
}

impl Palette {
    /// CSS custom properties the stylesheet reads its accent colors from.
    pub fn css_variables(&self) -> [(&'static str, &str); 3] {
        [
            ("--accent-primary", self.primary.as_str()),
            ("--accent-secondary", self.secondary.as_str()),
            ("--accent-highlight", self.highlight.as_str()),
        ]
    }
}

impl PageContent {
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_json(BUILTIN_CONTENT)
    }

    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        let mut content: PageContent = serde_json::from_str(raw)?;
        content.motion = content.motion.sanitized();
        content.validate()?;
        Ok(content)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.name.trim().is_empty() {
            return Err(ContentError::EmptyName);
        }

        if let Some(skill) = self.skills.iter().find(|skill| skill.level > 100) {
            return Err(ContentError::SkillLevelOutOfRange {
                name: skill.name.clone(),
                level: skill.level,
            });
        }

        if let Some(project) = self.projects.iter().find(|project| project.tech.is_empty()) {
            return Err(ContentError::ProjectWithoutTags {
                title: project.title.clone(),
            });
        }

        if self.palette.particles.is_empty() {
            return Err(ContentError::EmptyParticlePalette);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_json() -> serde_json::Value {
        serde_json::from_str(BUILTIN_CONTENT).expect("builtin content is JSON")
    }

    #[test]
    fn builtin_content_is_valid() {
        let content = PageContent::builtin().expect("builtin content validates");

        assert!(!content.projects.is_empty());
        assert!(!content.skills.is_empty());
        assert!(!content.tech_stack.is_empty());
        assert_eq!(content.motion, MotionConfig::default());
    }

    #[test]
    fn skill_fill_fraction_tracks_level() {
        let content = PageContent::builtin().expect("builtin content validates");

        for skill in &content.skills {
            assert_eq!(skill.fill_fraction(), f64::from(skill.level) / 100.0);
        }
    }

    #[test]
    fn skill_above_one_hundred_is_rejected() {
        let mut raw = builtin_json();
        raw["skills"][0]["level"] = serde_json::json!(101);

        let result = PageContent::from_json(&raw.to_string());
        assert!(matches!(
            result,
            Err(ContentError::SkillLevelOutOfRange { level: 101, .. })
        ));
    }

    #[test]
    fn negative_skill_level_fails_to_parse() {
        let mut raw = builtin_json();
        raw["skills"][0]["level"] = serde_json::json!(-5);

        let result = PageContent::from_json(&raw.to_string());
        assert!(matches!(result, Err(ContentError::Parse(_))));
    }

    #[test]
    fn project_without_tags_is_rejected() {
        let mut raw = builtin_json();
        raw["projects"][1]["tech"] = serde_json::json!([]);

        let result = PageContent::from_json(&raw.to_string());
        assert!(matches!(result, Err(ContentError::ProjectWithoutTags { .. })));
    }

    #[test]
    fn empty_particle_palette_is_rejected() {
        let mut raw = builtin_json();
        raw["palette"]["particles"] = serde_json::json!([]);

        let result = PageContent::from_json(&raw.to_string());
        assert!(matches!(result, Err(ContentError::EmptyParticlePalette)));
    }

    #[test]
    fn motion_overrides_are_sanitized_on_load() {
        let mut raw = builtin_json();
        raw["motion"] = serde_json::json!({
            "particleSpawnIntervalMs": 1000.0,
            "followerSmoothing": 42.0
        });

        let content = PageContent::from_json(&raw.to_string()).expect("content validates");
        assert_eq!(content.motion.particle_spawn_interval_ms, 1_000.0);
        assert_eq!(
            content.motion.follower_smoothing,
            MotionConfig::default().follower_smoothing
        );
    }

    #[test]
    fn project_order_is_preserved() {
        let content = PageContent::builtin().expect("builtin content validates");
        let raw = builtin_json();

        for (index, project) in content.projects.iter().enumerate() {
            assert_eq!(raw["projects"][index]["title"], project.title.as_str());
        }
    }
}
