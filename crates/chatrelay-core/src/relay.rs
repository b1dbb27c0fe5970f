//! Chatbot relay: forwards queries to the chatbot backend and records the
//! exchange.
//!
//! The backend speaks the same JSON shapes as our own API: it receives a
//! [`ChatQuery`] at `POST {base}/api/chat` and answers with a
//! [`ChatResponse`].

use crate::repository::ChatRepository;
use crate::{RelayError, Result};
use async_trait::async_trait;
use chatrelay_types::{ChatQuery, ChatResponse, NewInteraction};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Backend address used when none is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Default bound on a single backend call.
pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Reject queries with no non-whitespace content.
pub fn validate_query(query: &ChatQuery) -> Result<()> {
    if query.is_blank() {
        return Err(RelayError::InvalidInput("Query cannot be empty".into()));
    }
    Ok(())
}

/// Produces chat responses for user queries.
#[async_trait]
pub trait ChatbotService: Send + Sync {
    async fn get_chat_response(&self, query: &ChatQuery) -> Result<ChatResponse>;
}

/// Settings for [`HttpChatbotRelay`].
#[derive(Debug, Clone, Default)]
pub struct RelayConfig {
    /// Base URL of the chatbot backend. `None` falls back to
    /// [`DEFAULT_BACKEND_URL`].
    pub backend_url: Option<String>,
    /// Request timeout. `None` uses [`DEFAULT_BACKEND_TIMEOUT`].
    pub timeout: Option<Duration>,
}

/// [`ChatbotService`] that calls the backend over HTTP and persists every
/// successful exchange before returning it.
pub struct HttpChatbotRelay {
    client: Client,
    endpoint: String,
    repository: Arc<dyn ChatRepository>,
}

impl HttpChatbotRelay {
    pub fn new(config: RelayConfig, repository: Arc<dyn ChatRepository>) -> Result<Self> {
        let base_url = match config.backend_url {
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                warn!(
                    target: "chatrelay::relay",
                    "Backend URL is not set. Using default: {}", DEFAULT_BACKEND_URL
                );
                DEFAULT_BACKEND_URL.to_string()
            }
        };

        let client = Client::builder()
            .timeout(config.timeout.unwrap_or(DEFAULT_BACKEND_TIMEOUT))
            .build()
            .map_err(|e| RelayError::InternalError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: chat_endpoint(&base_url),
            repository,
        })
    }

    /// The full URL queries are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch_response(&self, query: &ChatQuery) -> Result<ChatResponse> {
        let resp = self.client.post(&self.endpoint).json(query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RelayError::BackendError(format!(
                "backend returned status {status}"
            )));
        }

        let body: ChatResponse = resp.json().await?;
        if body.response.trim().is_empty() {
            error!(target: "chatrelay::relay", "Received empty response from backend");
            return Err(RelayError::BackendError(
                "backend returned an empty response".into(),
            ));
        }
        Ok(body)
    }

    async fn relay(&self, query: &ChatQuery) -> Result<ChatResponse> {
        let response = self.fetch_response(query).await?;

        let saved = self
            .repository
            .log_interaction(NewInteraction::now(
                query.query.clone(),
                response.response.clone(),
            ))
            .await?;
        info!(target: "chatrelay::relay", "Interaction {} recorded", saved.id);

        Ok(response)
    }
}

#[async_trait]
impl ChatbotService for HttpChatbotRelay {
    async fn get_chat_response(&self, query: &ChatQuery) -> Result<ChatResponse> {
        info!(target: "chatrelay::relay", "Processing query: {}", query.query);
        let result = self.relay(query).await;
        if let Err(e) = &result {
            error!(target: "chatrelay::relay", "Error getting chat response: {}", e);
        }
        result
    }
}

fn chat_endpoint(base_url: &str) -> String {
    format!("{}/api/chat", base_url.trim_end_matches('/'))
}
