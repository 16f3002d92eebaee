//! `folio doctor` — Diagnose configuration and provider health.

use folio_config::AppConfig;
use folio_knowledge::KnowledgeBase;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 folio doctor — diagnostics");
    println!("=============================\n");

    let mut issues = 0;

    // Check config
    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config loaded");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            return Err(e.into());
        }
    };

    // Check API key
    if config.has_api_key() {
        println!("  ✅ API key configured");
    } else {
        println!("  ⚠️  No API key — set FOLIO_API_KEY or GROQ_API_KEY");
        issues += 1;
    }

    // Check knowledge base
    match KnowledgeBase::load_from(&config.knowledge_path) {
        Ok(kb) => {
            println!(
                "  ✅ Knowledge base valid ({} projects, {} skill categories)",
                kb.projects.len(),
                kb.skills.len()
            );
            for project in &kb.projects {
                if project.architecture_image.is_empty() {
                    println!("  ⚠️  Project '{}' has no architecture image", project.id);
                    issues += 1;
                }
            }
        }
        Err(e) => {
            println!("  ❌ Knowledge base invalid: {e}");
            issues += 1;
        }
    }

    // Check provider reachability
    match folio_providers::build_from_config(&config) {
        Ok(provider) => match provider.health_check().await {
            Ok(true) => println!("  ✅ Provider '{}' reachable", provider.name()),
            Ok(false) => {
                println!("  ⚠️  Provider '{}' returned an error", provider.name());
                issues += 1;
            }
            Err(e) => {
                println!("  ⚠️  Provider unreachable: {e}");
                issues += 1;
            }
        },
        Err(e) => {
            println!("  ❌ Provider not configured: {e}");
            issues += 1;
        }
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
