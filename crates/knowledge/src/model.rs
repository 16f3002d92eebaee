//! Knowledge-base data model.
//!
//! Every collection here is ordered and the order is meaningful: experience
//! entries are chronological as authored, focus topics reflect current
//! priority, and projects render in input order. Nothing sorts.

use serde::{Deserialize, Serialize};

/// The full static knowledge base: everything the assistant may talk about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub profile: Profile,

    /// Skill categories in display order
    #[serde(default)]
    pub skills: Vec<SkillCategory>,

    /// Work history, chronological as authored
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,

    /// Current learning/building focus, in priority order
    #[serde(default)]
    pub focus: Vec<FocusTopic>,

    /// Project deep-dives, in display order
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Personal information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub bio: String,
    pub tagline: String,

    /// Social links in display order
    #[serde(default)]
    pub socials: Vec<SocialLink>,
}

/// A labelled social link (github, linkedin, email, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

/// A skill category with its ordered skill names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub items: Vec<String>,
}

/// One work-experience entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    /// Free-text date range, e.g. "Dec 2024 – Feb 2025"
    pub date: String,
    pub description: String,
}

/// A current-focus topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTopic {
    pub title: String,
    pub description: String,
}

/// A project deep-dive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub tagline: String,

    /// Tech tags in display order
    #[serde(default)]
    pub tech: Vec<String>,

    pub description: String,

    /// URL of the architecture diagram; the prompt instructs the model to
    /// use this exact URL when asked to show the project
    pub architecture_image: String,

    #[serde(default)]
    pub github_link: Option<String>,

    #[serde(default)]
    pub backend_link: Option<String>,

    #[serde(default)]
    pub demo_link: Option<String>,

    #[serde(default)]
    pub video_link: Option<String>,

    /// Named detail sections, in display order
    #[serde(default)]
    pub sections: Vec<DetailSection>,

    #[serde(default)]
    pub more_detail_link: Option<String>,
}

/// A named detail section within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailSection {
    pub title: String,
    pub content: String,
}
