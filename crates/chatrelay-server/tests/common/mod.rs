//! Shared helpers for chat relay integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chatrelay_core::{ChatRepository, ChatbotService, InteractionStore, RelayError, Result};
use chatrelay_server::{config::Config, routes, state::AppState};
use chatrelay_types::{ChatInteraction, ChatQuery, ChatResponse, NewInteraction};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Relay fake that answers every query with a fixed text and counts calls.
pub struct CountingRelay {
    pub calls: AtomicUsize,
    pub answer: std::result::Result<String, String>,
}

impl CountingRelay {
    pub fn answering(text: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            answer: Ok(text.to_string()),
        })
    }

    pub fn failing(detail: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            answer: Err(detail.to_string()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatbotService for CountingRelay {
    async fn get_chat_response(&self, _query: &ChatQuery) -> Result<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Ok(text) => Ok(ChatResponse::new(text.clone())),
            Err(detail) => Err(RelayError::BackendError(detail.clone())),
        }
    }
}

/// Repository whose every operation fails.
pub struct BrokenRepository;

#[async_trait]
impl ChatRepository for BrokenRepository {
    async fn log_interaction(&self, _: NewInteraction) -> Result<ChatInteraction> {
        Err(RelayError::PersistenceError(rusqlite::Error::InvalidQuery))
    }

    async fn get_interactions(&self) -> Result<Vec<ChatInteraction>> {
        Err(RelayError::PersistenceError(rusqlite::Error::InvalidQuery))
    }
}

pub fn test_config(temp_dir: &TempDir) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        db_path: temp_dir.path().join("test.db"),
        backend_url: None,
        backend_timeout_secs: 5,
    }
}

/// Open a store in a fresh temp dir.
pub fn test_store() -> (InteractionStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = InteractionStore::open(&temp_dir.path().join("test.db")).unwrap();
    (store, temp_dir)
}

/// Router over the given collaborators.
pub fn app_with(
    relay: Arc<dyn ChatbotService>,
    repository: Arc<dyn ChatRepository>,
) -> Router {
    let state = Arc::new(AppState::from_parts(relay, repository));
    routes::router(state)
}

/// Serve `app` on an ephemeral port and return its base URL.
pub async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// POST a raw body to `/api/chat` and return status plus body text.
pub async fn post_chat_raw(app: &Router, body: String) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn post_chat(app: &Router, query: &str) -> (StatusCode, String) {
    let body = serde_json::to_string(&ChatQuery::new(query)).unwrap();
    post_chat_raw(app, body).await
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, value)
}
