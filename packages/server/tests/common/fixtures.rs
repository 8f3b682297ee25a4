//! Test fixtures for chat messages and stored records.

use std::sync::atomic::{AtomicU64, Ordering};

use counting_core::common::{ActorId, ChannelId, MessageId};
use counting_core::domains::counting::ChatMessage;
use counting_core::kernel::InMemoryStore;
use serde_json::json;

static NEXT_MESSAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Unique message id so messages never trip the dedup window by accident.
pub fn next_message_id() -> MessageId {
    MessageId::new(format!("msg-{}", NEXT_MESSAGE_ID.fetch_add(1, Ordering::Relaxed)))
}

pub fn message(actor: &str, channel: &str, text: &str) -> ChatMessage {
    ChatMessage {
        actor_id: ActorId::new(actor),
        channel_id: ChannelId::new(channel),
        message_id: next_message_id(),
        text: text.to_string(),
    }
}

/// In-memory store pre-seeded with a saved game record.
pub async fn seeded_store(
    key: &str,
    channel: &str,
    current_number: u64,
    last_actor: Option<&str>,
) -> InMemoryStore {
    InMemoryStore::new()
        .with_entry(
            key,
            json!({
                "channelId": channel,
                "currentNumber": current_number,
                "lastActorId": last_actor,
            }),
        )
        .await
}
