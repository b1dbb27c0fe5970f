//! Core relay and persistence logic for the chat relay.

mod error;
mod relay;
mod repository;
mod store;

pub use error::RelayError;
pub use relay::{
    validate_query, ChatbotService, HttpChatbotRelay, RelayConfig, DEFAULT_BACKEND_TIMEOUT,
    DEFAULT_BACKEND_URL,
};
pub use repository::ChatRepository;
pub use store::InteractionStore;

/// Result type for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
