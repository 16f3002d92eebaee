//! # Folio Core
//!
//! Domain types, traits, and error definitions for the folio portfolio gateway.
//! This crate has **zero framework dependencies** — it defines the domain model
//! that all other crates implement against.
//!
//! The central abstraction is the [`Provider`] trait: the external LLM backend
//! the chat relay forwards conversations to. Implementations live in
//! `folio-providers`; the relay and gateway only ever see the trait.

pub mod error;
pub mod message;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, Result};
pub use message::{Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, StreamChunk, Usage};
