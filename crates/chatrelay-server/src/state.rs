//! Shared application state.

use crate::config::Config;
use chatrelay_core::{ChatRepository, ChatbotService, HttpChatbotRelay, InteractionStore, RelayConfig};
use std::sync::Arc;
use std::time::Duration;

/// Shared application state.
pub struct AppState {
    pub relay: Arc<dyn ChatbotService>,
    pub repository: Arc<dyn ChatRepository>,
}

impl AppState {
    /// Open the interaction store and build the HTTP relay from `config`.
    pub fn new(config: &Config) -> chatrelay_core::Result<Self> {
        let store = InteractionStore::open(&config.db_path)?;
        let repository: Arc<dyn ChatRepository> = Arc::new(store);

        let relay = HttpChatbotRelay::new(
            RelayConfig {
                backend_url: config.backend_url.clone(),
                timeout: Some(Duration::from_secs(config.backend_timeout_secs)),
            },
            repository.clone(),
        )?;

        Ok(Self::from_parts(Arc::new(relay), repository))
    }

    /// Assemble state from already-built collaborators.
    pub fn from_parts(
        relay: Arc<dyn ChatbotService>,
        repository: Arc<dyn ChatRepository>,
    ) -> Self {
        Self { relay, repository }
    }
}
