//! `folio prompt` — Print the assembled system prompt.
//!
//! Useful for eyeballing exactly what the model receives after editing
//! the knowledge-base file.

use folio_config::AppConfig;
use folio_knowledge::{KnowledgeBase, system_prompt};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let knowledge = KnowledgeBase::load_from(&config.knowledge_path)
        .map_err(|e| format!("Failed to load knowledge base: {e}"))?;

    print!("{}", system_prompt(&knowledge));

    Ok(())
}
