//! Event adapter - raw connector events into candidate messages.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::common::{ActorId, ChannelId, MessageId};
use crate::domains::counting::events::ChatMessage;

/// Message event as delivered by the chat connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawChatEvent {
    pub author_id: ActorId,
    #[serde(default)]
    pub author_is_self: bool,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    #[serde(default)]
    pub text: String,
}

impl RawChatEvent {
    /// Extract the candidate message, or `None` for the bot's own messages.
    pub fn into_candidate(self, bot_user_id: Option<&ActorId>) -> Option<ChatMessage> {
        if self.author_is_self || bot_user_id == Some(&self.author_id) {
            trace!(message_id = %self.message_id, "Skipping bot-authored message");
            return None;
        }

        Some(ChatMessage {
            actor_id: self.author_id,
            channel_id: self.channel_id,
            message_id: self.message_id,
            text: self.text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(author: &str, is_self: bool) -> RawChatEvent {
        RawChatEvent {
            author_id: ActorId::new(author),
            author_is_self: is_self,
            channel_id: ChannelId::new("c"),
            message_id: MessageId::new("m"),
            text: "1".to_string(),
        }
    }

    #[test]
    fn test_deserializes_connector_payload() {
        let event: RawChatEvent = serde_json::from_value(json!({
            "authorId": "11",
            "authorIsSelf": false,
            "channelId": "22",
            "messageId": "33",
            "text": " 5 "
        }))
        .unwrap();

        assert_eq!(event.author_id, ActorId::new("11"));
        assert_eq!(event.text, " 5 ");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let event: RawChatEvent = serde_json::from_value(json!({
            "authorId": "11",
            "channelId": "22",
            "messageId": "33"
        }))
        .unwrap();

        assert!(!event.author_is_self);
        assert_eq!(event.text, "");
    }

    #[test]
    fn test_self_flag_is_filtered() {
        assert!(raw("bot", true).into_candidate(None).is_none());
    }

    #[test]
    fn test_configured_bot_identity_is_filtered() {
        let bot = ActorId::new("bot");
        assert!(raw("bot", false).into_candidate(Some(&bot)).is_none());
        assert!(raw("human", false).into_candidate(Some(&bot)).is_some());
    }

    #[test]
    fn test_candidate_carries_all_fields() {
        let candidate = raw("human", false).into_candidate(None).unwrap();
        assert_eq!(
            candidate,
            ChatMessage {
                actor_id: ActorId::new("human"),
                channel_id: ChannelId::new("c"),
                message_id: MessageId::new("m"),
                text: "1".to_string(),
            }
        );
    }
}
