//! Chat relay route.

use super::error_response;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use chatrelay_types::{ChatQuery, ChatResponse};
use std::sync::Arc;

/// Relay a query to the chatbot backend.
///
/// Blank queries are rejected with 400 before the relay is touched.
pub async fn send(
    State(state): State<Arc<AppState>>,
    Json(query): Json<ChatQuery>,
) -> Result<Json<ChatResponse>, (StatusCode, String)> {
    chatrelay_core::validate_query(&query).map_err(error_response)?;

    let response = state
        .relay
        .get_chat_response(&query)
        .await
        .map_err(error_response)?;
    Ok(Json(response))
}
