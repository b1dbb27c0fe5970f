//! Error types for the chat relay.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Persistence error: {0}")]
    PersistenceError(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RelayError::BackendError(format!("request timed out: {e}"))
        } else if e.is_decode() {
            RelayError::BackendError(format!("undecodable response: {e}"))
        } else {
            RelayError::BackendError(e.to_string())
        }
    }
}

impl From<tokio::task::JoinError> for RelayError {
    fn from(e: tokio::task::JoinError) -> Self {
        RelayError::InternalError(format!("blocking task failed: {e}"))
    }
}
