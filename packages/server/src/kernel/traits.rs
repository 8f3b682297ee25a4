// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no game logic.
// Game logic (validation, resets) lives in domains/counting and uses these traits.
//
// Naming convention: Base* for trait names (e.g., BaseKeyValueStore, BaseChatReactor)

use async_trait::async_trait;
use thiserror::Error;

use crate::common::{ChannelId, MessageId};

// =============================================================================
// Key/Value Store Trait (Infrastructure - external persistence)
// =============================================================================

/// Errors raised by key/value store backends.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// A get/set document store. Each key holds one whole JSON document.
#[async_trait]
pub trait BaseKeyValueStore: Send + Sync {
    /// Fetch the document stored under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError>;

    /// Replace the document stored under `key`.
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StoreError>;

    /// Short backend name for health reporting.
    fn backend_name(&self) -> &'static str;
}

// =============================================================================
// Chat Reactor Trait (Infrastructure - messaging platform output)
// =============================================================================

/// Errors raised while delivering reactions or messages.
#[derive(Error, Debug)]
pub enum ReactionError {
    /// The target message no longer exists (deleted before we reacted).
    #[error("Message not found")]
    MessageNotFound,

    #[error("Connector rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait BaseChatReactor: Send + Sync {
    /// Add an emoji reaction to a message.
    async fn add_reaction(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        emoji: &str,
    ) -> Result<(), ReactionError>;

    /// Post a plain text message to a channel.
    async fn send_message(&self, channel_id: &ChannelId, content: &str)
        -> Result<(), ReactionError>;
}
