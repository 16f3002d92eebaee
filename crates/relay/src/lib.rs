//! # Folio Relay
//!
//! The streaming chat relay: validates the inbound conversation, attaches
//! the system prompt assembled from the knowledge base, opens a one-shot
//! streaming call to the model provider, and forwards the reply to the
//! caller as word-level chunks under a hard wall-clock ceiling.
//!
//! Each request is an independent pipeline with one upstream suspension
//! point (awaiting the next provider chunk) and one downstream emission
//! point (sending the chunk to the caller). There is no shared mutable
//! state: the knowledge base is read-only and the system prompt is rebuilt
//! on every call.

pub mod chunker;
pub mod request;

pub use chunker::WordChunker;
pub use request::{ChatRequest, ChatTurn, ContentPart, TurnRole};

use folio_core::error::ProviderError;
use folio_core::message::Message;
use folio_core::provider::{Provider, ProviderRequest};
use folio_knowledge::{KnowledgeBase, system_prompt};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, error, info};

/// Errors surfaced by the relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The request failed validation; no provider call was made.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The wall-clock ceiling elapsed; the in-flight call was abandoned.
    #[error("Request exceeded the {0:?} ceiling")]
    DeadlineExceeded(Duration),
}

/// One item of the relayed stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// A word-aligned piece of assistant text.
    Delta(String),
    /// Terminal marker: the reply completed normally.
    Done,
}

/// Tunables for a relay instance, taken from `AppConfig` at startup.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Wall-clock ceiling for the whole request, opening call included.
    pub request_timeout: Duration,
}

/// The chat relay. Cheap to share; holds only immutable configuration.
pub struct ChatRelay {
    provider: Arc<dyn Provider>,
    knowledge: Arc<KnowledgeBase>,
    settings: RelaySettings,
}

impl ChatRelay {
    pub fn new(
        provider: Arc<dyn Provider>,
        knowledge: Arc<KnowledgeBase>,
        settings: RelaySettings,
    ) -> Self {
        Self {
            provider,
            knowledge,
            settings,
        }
    }

    /// The system prompt as the next request would see it.
    pub fn current_system_prompt(&self) -> String {
        system_prompt(&self.knowledge)
    }

    /// Validate the history and open a relayed reply stream.
    ///
    /// Returns a receiver of word-aligned [`RelayEvent`]s ending in
    /// `RelayEvent::Done`, or an error item on provider failure or deadline
    /// expiry. Dropping the receiver cancels further relaying; the spawned
    /// task exits on the next send and the upstream HTTP stream is dropped
    /// with it.
    pub async fn stream_reply(
        &self,
        turns: Vec<ChatTurn>,
    ) -> Result<mpsc::Receiver<Result<RelayEvent, RelayError>>, RelayError> {
        let messages = Self::validate(turns)?;

        // Recomputed per request: the knowledge base must never go stale
        // mid-session across deployments.
        let mut provider_messages = vec![Message::system(system_prompt(&self.knowledge))];
        provider_messages.extend(messages);

        let request = ProviderRequest {
            model: self.settings.model.clone(),
            messages: provider_messages,
            temperature: self.settings.temperature,
            max_tokens: Some(self.settings.max_output_tokens),
            stream: true,
        };

        let ceiling = self.settings.request_timeout;
        let deadline = Instant::now() + ceiling;

        // The deadline covers opening the call, not just the chunk loop.
        let mut upstream = timeout_at(deadline, self.provider.stream(request))
            .await
            .map_err(|_| RelayError::DeadlineExceeded(ceiling))??;

        debug!(provider = self.provider.name(), "Provider stream opened");

        let (tx, rx) = mpsc::channel(64);

        tokio::spawn(async move {
            let mut chunker = WordChunker::new();

            loop {
                let next = match timeout_at(deadline, upstream.recv()).await {
                    Ok(next) => next,
                    Err(_) => {
                        error!(ceiling_secs = ceiling.as_secs(), "Relay deadline exceeded");
                        let _ = tx.send(Err(RelayError::DeadlineExceeded(ceiling))).await;
                        return;
                    }
                };

                match next {
                    // Upstream closed: treat as completion.
                    None => {
                        if let Some(rest) = chunker.flush()
                            && tx.send(Ok(RelayEvent::Delta(rest))).await.is_err()
                        {
                            return;
                        }
                        let _ = tx.send(Ok(RelayEvent::Done)).await;
                        return;
                    }
                    Some(Err(e)) => {
                        error!(error = %e, "Provider stream failed");
                        let _ = tx.send(Err(RelayError::Provider(e))).await;
                        return;
                    }
                    Some(Ok(chunk)) => {
                        if let Some(text) = chunk.content {
                            for word in chunker.push(&text) {
                                if tx.send(Ok(RelayEvent::Delta(word))).await.is_err() {
                                    // Caller went away; stop relaying.
                                    return;
                                }
                            }
                        }

                        if chunk.done {
                            if let Some(rest) = chunker.flush()
                                && tx.send(Ok(RelayEvent::Delta(rest))).await.is_err()
                            {
                                return;
                            }
                            if let Some(usage) = chunk.usage {
                                info!(
                                    prompt_tokens = usage.prompt_tokens,
                                    completion_tokens = usage.completion_tokens,
                                    "Chat reply completed"
                                );
                            }
                            let _ = tx.send(Ok(RelayEvent::Done)).await;
                            return;
                        }
                    }
                }
            }
        });

        Ok(rx)
    }

    /// Reject histories the provider should never see.
    fn validate(turns: Vec<ChatTurn>) -> Result<Vec<Message>, RelayError> {
        if turns.is_empty() {
            return Err(RelayError::InvalidRequest("message list is empty".into()));
        }

        let messages: Vec<Message> = turns.into_iter().map(ChatTurn::into_message).collect();

        if messages.iter().all(|m| m.content.trim().is_empty()) {
            return Err(RelayError::InvalidRequest(
                "history contains no text content".into(),
            ));
        }

        Ok(messages)
    }
}
