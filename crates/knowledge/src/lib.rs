//! # Folio Knowledge
//!
//! The static knowledge base the chat assistant is grounded in: personal
//! info, skills, work experience, current focus topics, and project
//! deep-dives, plus the formatter that renders it all into the model's
//! system prompt.
//!
//! The data is read-only for the lifetime of the process. The system prompt
//! is a pure function of this data — rendering it twice produces
//! byte-identical output — and is rebuilt on every chat request so a
//! redeployed knowledge base can never go stale mid-session.

pub mod model;
pub mod prompt;

pub use model::{
    DetailSection, ExperienceEntry, FocusTopic, KnowledgeBase, Profile, Project, SkillCategory,
    SocialLink,
};
pub use prompt::{format_knowledge_base, refusal_text, system_prompt};

use std::path::{Path, PathBuf};

/// Errors raised while loading the knowledge-base file.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("Failed to read knowledge base at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse knowledge base at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },
}

impl KnowledgeBase {
    /// Load the knowledge base from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self, KnowledgeError> {
        let content = std::fs::read_to_string(path).map_err(|e| KnowledgeError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| KnowledgeError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
