//! Chat connector clients (implement `BaseChatReactor`).
//!
//! The bot does not talk to a chat platform directly. A connector process owns
//! the platform session, forwards message events to `/events`, and exposes a
//! small REST surface for reactions and messages:
//!
//! ```text
//! PUT  {base}/channels/{channel_id}/messages/{message_id}/reactions/{emoji}
//! POST {base}/channels/{channel_id}/messages        {"content": "..."}
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, info};

use crate::common::{ChannelId, MessageId};
use crate::kernel::{BaseChatReactor, ReactionError};

#[derive(Debug, Clone)]
pub struct ConnectorOptions {
    pub base_url: String,
    pub token: Option<String>,
}

#[derive(Serialize)]
struct SendMessageBody<'a> {
    content: &'a str,
}

/// HTTP client for the chat connector.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    options: ConnectorOptions,
    client: Client,
}

impl HttpConnector {
    pub fn new(options: ConnectorOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    fn base(&self) -> &str {
        self.options.base_url.trim_end_matches('/')
    }

    pub(crate) fn reaction_url(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        emoji: &str,
    ) -> String {
        format!(
            "{}/channels/{}/messages/{}/reactions/{}",
            self.base(),
            urlencoding::encode(channel_id.as_str()),
            urlencoding::encode(message_id.as_str()),
            urlencoding::encode(emoji),
        )
    }

    pub(crate) fn messages_url(&self, channel_id: &ChannelId) -> String {
        format!(
            "{}/channels/{}/messages",
            self.base(),
            urlencoding::encode(channel_id.as_str()),
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.options.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Map a connector response onto the reaction error taxonomy.
async fn check_response(response: Response) -> Result<(), ReactionError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ReactionError::MessageNotFound);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ReactionError::Rejected {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl BaseChatReactor for HttpConnector {
    async fn add_reaction(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        emoji: &str,
    ) -> Result<(), ReactionError> {
        let url = self.reaction_url(channel_id, message_id, emoji);
        debug!(url = %url, "Adding reaction");
        let response = self.authorize(self.client.put(url)).send().await?;
        check_response(response).await
    }

    async fn send_message(
        &self,
        channel_id: &ChannelId,
        content: &str,
    ) -> Result<(), ReactionError> {
        let url = self.messages_url(channel_id);
        debug!(url = %url, "Sending channel message");
        let response = self
            .authorize(self.client.post(url))
            .json(&SendMessageBody { content })
            .send()
            .await?;
        check_response(response).await
    }
}

/// Reactor used when no connector is configured: everything goes to the log.
#[derive(Debug, Clone, Default)]
pub struct LogReactor;

#[async_trait]
impl BaseChatReactor for LogReactor {
    async fn add_reaction(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        emoji: &str,
    ) -> Result<(), ReactionError> {
        info!(channel_id = %channel_id, message_id = %message_id, emoji = %emoji, "Reaction");
        Ok(())
    }

    async fn send_message(
        &self,
        channel_id: &ChannelId,
        content: &str,
    ) -> Result<(), ReactionError> {
        info!(channel_id = %channel_id, content = %content, "Channel message");
        Ok(())
    }
}
