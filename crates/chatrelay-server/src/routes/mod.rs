//! HTTP route handlers.

pub mod chat;
pub mod interactions;

use crate::state::AppState;
use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chatrelay_core::RelayError;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub(crate) const INTERNAL_ERROR_MESSAGE: &str = "An error occurred while processing your request";

/// Map a relay error to the response a client sees.
///
/// Only validation failures carry their message. Everything else is logged and
/// reported as a generic 500.
pub(crate) fn error_response(e: RelayError) -> (StatusCode, String) {
    match e {
        RelayError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message),
        other => {
            tracing::error!(target: "chatrelay::api", "Error processing request: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
            )
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the full application router.
pub fn router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/chat", post(chat::send))
        .route("/chat/interactions", get(interactions::list))
        .route("/health", get(health));

    Router::new()
        .nest("/api", api_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
