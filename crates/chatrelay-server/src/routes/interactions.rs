//! Interaction history routes.

use super::error_response;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chatrelay_types::ChatInteraction;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct InteractionListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Serialize)]
pub struct InteractionListResponse {
    pub interactions: Vec<ChatInteraction>,
    pub total_count: usize,
}

/// List recorded interactions, newest first.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InteractionListQuery>,
) -> Result<Json<InteractionListResponse>, (StatusCode, String)> {
    let interactions = state
        .repository
        .get_interactions()
        .await
        .map_err(error_response)?;

    let limit = query.limit.unwrap_or(50);
    let offset = query.offset.unwrap_or(0);
    let total_count = interactions.len();

    Ok(Json(InteractionListResponse {
        interactions: interactions.into_iter().skip(offset).take(limit).collect(),
        total_count,
    }))
}
