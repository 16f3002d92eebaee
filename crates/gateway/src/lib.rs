//! HTTP API gateway for the folio portfolio site.
//!
//! Exposes the chat relay and a health check:
//!
//! - `POST /api/chat` — send the conversation history, receive an SSE stream
//! - `GET  /health`   — liveness probe
//!
//! Built on Axum. Requests are independent and concurrent; the only shared
//! state is the immutable relay (provider handle + knowledge base),
//! constructed once at startup and injected into every handler.

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    response::sse::{Event as SseEvent, Sse},
    routing::{get, post},
};
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use folio_knowledge::KnowledgeBase;
use folio_relay::{ChatRelay, ChatRequest, RelayError, RelayEvent, RelaySettings};

/// Shared application state for the gateway.
pub struct GatewayState {
    pub relay: Arc<ChatRelay>,
}

pub type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
///
/// Layers applied:
/// - CORS restricted to the configured site origin
/// - Request body size limit (1 MB)
/// - HTTP trace logging
pub fn build_router(state: SharedState, allowed_origin: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::exact(
            allowed_origin
                .parse()
                .expect("allowed_origin must be a valid header value"),
        ))
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB body limit
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Builds the provider, loads the knowledge base, and wires both into a
/// single relay shared by all requests.
pub async fn start(config: folio_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let host = config.gateway.host.clone();
    let port = config.gateway.port;
    let addr = format!("{host}:{port}");

    let provider = folio_providers::build_from_config(&config)?;
    let knowledge = Arc::new(KnowledgeBase::load_from(&config.knowledge_path)?);

    info!(
        provider = provider.name(),
        model = %config.model,
        knowledge = %config.knowledge_path.display(),
        projects = knowledge.projects.len(),
        "Gateway starting"
    );

    let relay = Arc::new(ChatRelay::new(
        provider,
        knowledge,
        RelaySettings {
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            request_timeout: std::time::Duration::from_secs(config.request_timeout_secs),
        },
    ));

    let state = Arc::new(GatewayState { relay });
    let app = build_router(state, &config.gateway.allowed_origin);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Gateway listening");
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Generic failure text sent to the browser. Internal detail stays in the
/// server logs.
const CLIENT_ERROR_TEXT: &str = "The assistant is unavailable right now. Please try again.";

/// `POST /api/chat` — relay the conversation, stream the reply as SSE.
///
/// Events: `delta` (JSON `{"text": ...}`), terminal `done`, in-stream
/// `error`. Malformed bodies never reach this handler; the `Json` extractor
/// rejects them with a client error before any provider work happens.
async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Sse<impl futures::Stream<Item = Result<SseEvent, Infallible>>>, StatusCode> {
    let rx = match state.relay.stream_reply(payload.messages).await {
        Ok(rx) => rx,
        Err(RelayError::InvalidRequest(reason)) => {
            warn!(reason = %reason, "Rejected chat request");
            return Err(StatusCode::BAD_REQUEST);
        }
        Err(e) => {
            error!(error = %e, "Failed to open chat stream");
            return Err(StatusCode::BAD_GATEWAY);
        }
    };

    let stream = ReceiverStream::new(rx).map(|item| {
        let event = match item {
            Ok(RelayEvent::Delta(text)) => SseEvent::default()
                .event("delta")
                .data(serde_json::json!({ "text": text }).to_string()),
            Ok(RelayEvent::Done) => SseEvent::default().event("done").data("[DONE]"),
            Err(e) => {
                error!(error = %e, "Chat stream failed mid-relay");
                SseEvent::default().event("error").data(CLIENT_ERROR_TEXT)
            }
        };
        Ok(event)
    });

    Ok(Sse::new(stream))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use folio_core::error::ProviderError;
    use folio_core::provider::{Provider, ProviderRequest, ProviderResponse, StreamChunk};
    use folio_knowledge::Profile;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    struct StubProvider {
        invoked: Arc<AtomicBool>,
    }

    #[async_trait]
    impl Provider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(
            &self,
            _request: ProviderRequest,
        ) -> Result<ProviderResponse, ProviderError> {
            unimplemented!("tests only use stream()")
        }

        async fn stream(
            &self,
            _request: ProviderRequest,
        ) -> Result<mpsc::Receiver<Result<StreamChunk, ProviderError>>, ProviderError> {
            self.invoked.store(true, Ordering::SeqCst);
            let (tx, rx) = mpsc::channel(8);
            tokio::spawn(async move {
                for delta in ["Here ", "is the ", "answer"] {
                    if tx
                        .send(Ok(StreamChunk {
                            content: Some(delta.into()),
                            done: false,
                            usage: None,
                        }))
                        .await
                        .is_err()
                    {
                        return;
                    }
                }
                let _ = tx
                    .send(Ok(StreamChunk {
                        content: None,
                        done: true,
                        usage: None,
                    }))
                    .await;
            });
            Ok(rx)
        }
    }

    fn test_app() -> (Router, Arc<AtomicBool>) {
        let invoked = Arc::new(AtomicBool::new(false));
        let provider = Arc::new(StubProvider {
            invoked: invoked.clone(),
        });
        let knowledge = Arc::new(KnowledgeBase {
            profile: Profile {
                name: "Ada Example".into(),
                role: "Engineer".into(),
                bio: "bio".into(),
                tagline: "tagline".into(),
                socials: vec![],
            },
            skills: vec![],
            experience: vec![],
            focus: vec![],
            projects: vec![],
        });
        let relay = Arc::new(ChatRelay::new(
            provider,
            knowledge,
            RelaySettings {
                model: "test-model".into(),
                temperature: 0.7,
                max_output_tokens: 4096,
                request_timeout: std::time::Duration::from_secs(30),
            },
        ));
        let state = Arc::new(GatewayState { relay });
        (build_router(state, "http://localhost:3000"), invoked)
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (app, _) = test_app();

        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn chat_streams_sse_reply() {
        let (app, _) = test_app();

        let body = serde_json::json!({
            "messages": [
                {"role": "user", "parts": [{"type": "text", "text": "Show me Last Call"}]}
            ]
        });
        let req = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.starts_with("text/event-stream"))
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("event: delta"));
        assert!(text.contains("event: done"));
        assert!(text.contains("[DONE]"));
        // Word-aligned deltas carrying the reply text
        assert!(text.contains("Here"));
        assert!(text.contains("answer"));
    }

    #[tokio::test]
    async fn malformed_body_is_rejected_without_touching_the_provider() {
        let (app, invoked) = test_app();

        // "messages" is not a list
        let req = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"messages": "not a list"}"#))
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert!(response.status().is_client_error());
        assert!(!invoked.load(Ordering::SeqCst), "provider must not be called");
    }

    #[tokio::test]
    async fn missing_message_list_is_rejected_without_touching_the_provider() {
        let (app, invoked) = test_app();

        let req = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert!(response.status().is_client_error());
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn empty_message_list_is_a_bad_request() {
        let (app, invoked) = test_app();

        let req = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"messages": []}"#))
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(!invoked.load(Ordering::SeqCst));
    }
}
