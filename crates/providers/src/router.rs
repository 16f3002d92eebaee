//! Provider construction from configuration.
//!
//! Maps the `provider` setting in `AppConfig` to a concrete backend. A custom
//! base URL always wins over the named provider's default endpoint.

use crate::openai_compat::OpenAiCompatProvider;
use folio_config::AppConfig;
use folio_core::error::ProviderError;
use folio_core::provider::Provider;
use std::sync::Arc;

/// Build the configured provider.
///
/// Fails when no API key is available: the gateway cannot answer chat
/// requests without one, and a startup error beats a per-request 502.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let api_key = config.api_key.clone().ok_or_else(|| {
        ProviderError::NotConfigured(
            "No API key configured; set FOLIO_API_KEY or GROQ_API_KEY".into(),
        )
    })?;

    let provider = match (&config.provider_base_url, config.provider.as_str()) {
        (Some(base_url), name) => OpenAiCompatProvider::new(name, base_url, api_key),
        (None, "groq") => OpenAiCompatProvider::groq(api_key),
        (None, "openai") => OpenAiCompatProvider::openai(api_key),
        (None, other) => {
            return Err(ProviderError::NotConfigured(format!(
                "Unknown provider '{other}': use \"groq\", \"openai\", or set provider_base_url"
            )));
        }
    };

    Ok(Arc::new(provider.with_max_retries(config.max_retries)))
}
