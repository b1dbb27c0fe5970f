//! Persisted interaction types.
//!
//! A chat exchange is stored as two rows: a [`UserQuery`] and the
//! [`ChatbotResponse`] that references it. Readers only ever see the joined
//! [`ChatInteraction`] view.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A stored user query row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    /// Store-assigned identifier, never reused.
    pub id: i64,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A stored chatbot response row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatbotResponse {
    pub id: i64,
    /// The [`UserQuery`] this response answers.
    pub query_id: i64,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A query paired with its response.
///
/// `id` and `timestamp` are taken from the query half of the pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatInteraction {
    pub id: i64,
    pub query: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

/// An exchange that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInteraction {
    pub query: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

impl NewInteraction {
    /// Create an interaction stamped with the current UTC time, truncated to
    /// the microsecond precision the store keeps.
    pub fn now(query: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            response: response.into(),
            timestamp: Utc::now().trunc_subsecs(6),
        }
    }
}

impl ChatInteraction {
    /// Join a query row with its response row.
    ///
    /// Returns `None` when the response belongs to a different query.
    pub fn join(query: UserQuery, response: ChatbotResponse) -> Option<Self> {
        if response.query_id != query.id {
            return None;
        }
        Some(Self {
            id: query.id,
            query: query.text,
            response: response.text,
            timestamp: query.timestamp,
        })
    }
}
