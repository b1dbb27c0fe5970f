//! Shared types for the chat relay.

mod chat;
mod interaction;

pub use chat::*;
pub use interaction::*;
