//! LLM Provider implementations for folio.
//!
//! All providers implement the `folio_core::Provider` trait.
//! The router builds the configured provider at startup.

pub mod openai_compat;
pub mod router;

pub use openai_compat::OpenAiCompatProvider;
pub use router::build_from_config;
