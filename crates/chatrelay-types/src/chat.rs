//! Chat payloads exchanged with HTTP clients and the chatbot backend.
//!
//! The same two shapes are used on both sides of the relay: inbound requests
//! and the outbound backend call carry a [`ChatQuery`], and both answer with a
//! [`ChatResponse`].

use serde::{Deserialize, Deserializer, Serialize};

/// A user's chat query.
///
/// A missing or `null` query deserializes as empty, so it is rejected as blank
/// rather than as a malformed body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatQuery {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub query: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChatQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// True when the query has no non-whitespace characters.
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }
}

/// The chatbot's answer to a [`ChatQuery`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

impl ChatResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}
