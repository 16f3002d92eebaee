//! `folio serve` — Start the HTTP gateway.

use folio_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("📁 folio gateway");
    println!(
        "   Listening: {}:{}",
        config.gateway.host, config.gateway.port
    );
    println!("   Provider:  {} ({})", config.provider, config.model);
    println!("   Knowledge: {}", config.knowledge_path.display());

    folio_gateway::start(config).await?;

    Ok(())
}
