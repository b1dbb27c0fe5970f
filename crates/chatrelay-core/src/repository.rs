//! Interaction repository: the persistence capability the relay depends on.

use crate::store::InteractionStore;
use crate::Result;
use async_trait::async_trait;
use chatrelay_types::{ChatInteraction, NewInteraction};

/// Writes and reads chat interactions.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Persist a query and its response.
    async fn log_interaction(&self, interaction: NewInteraction) -> Result<ChatInteraction>;

    /// All complete interactions, newest first.
    async fn get_interactions(&self) -> Result<Vec<ChatInteraction>>;
}

#[async_trait]
impl ChatRepository for InteractionStore {
    async fn log_interaction(&self, interaction: NewInteraction) -> Result<ChatInteraction> {
        tracing::info!(target: "chatrelay::store", "Logging interaction to database");
        let store = self.clone();
        let result =
            tokio::task::spawn_blocking(move || store.insert_interaction(&interaction)).await?;
        if let Err(e) = &result {
            tracing::error!(target: "chatrelay::store", "Error logging interaction: {}", e);
        }
        result
    }

    async fn get_interactions(&self) -> Result<Vec<ChatInteraction>> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.list_interactions()).await?
    }
}
