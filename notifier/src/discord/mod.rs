//! Discord channel client
//!
//! Posts embeds to one fixed channel through the Discord REST API. The channel
//! is resolved once at startup; sends are fire-and-forget with no retry.

pub mod embeds;

use std::env;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;

use embeds::Embed;

mod defaults {
    pub const API_BASE: &str = "https://discord.com/api/v10";
    pub const CHANNEL_ID: &str = "932504732818362378";
}

/// Destination for formatted notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, embed: &Embed) -> Result<(), AppError>;
}

/// Body of `POST /channels/{id}/messages`
#[derive(Debug, Serialize)]
struct MessagePayload<'a> {
    embeds: [&'a Embed; 1],
}

/// Subset of the channel object returned by `GET /channels/{id}`
#[derive(Debug, Deserialize)]
struct Channel {
    id: String,
    name: Option<String>,
}

pub struct DiscordClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
    channel_id: String,
}

impl DiscordClient {
    pub fn new(api_base: String, token: String, channel_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
            channel_id,
        }
    }

    /// Create a client from `DISCORD_BOT_TOKEN`, `DISCORD_CHANNEL_ID` and
    /// `DISCORD_API_BASE`, then make sure the channel exists
    pub async fn connect() -> Result<Self, AppError> {
        let token = env::var("DISCORD_BOT_TOKEN")
            .map_err(|_| AppError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?;
        let channel_id =
            env::var("DISCORD_CHANNEL_ID").unwrap_or_else(|_| defaults::CHANNEL_ID.to_string());
        let api_base =
            env::var("DISCORD_API_BASE").unwrap_or_else(|_| defaults::API_BASE.to_string());

        let client = Self::new(api_base, token, channel_id);
        let channel = client.resolve_channel().await?;

        info!(
            channel_id = %channel.id,
            channel_name = channel.name.as_deref().unwrap_or("unknown"),
            "Resolved Discord channel"
        );

        Ok(client)
    }

    fn channel_url(&self) -> String {
        format!("{}/channels/{}", self.api_base, self.channel_id)
    }

    fn messages_url(&self) -> String {
        format!("{}/messages", self.channel_url())
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.token)
    }

    async fn resolve_channel(&self) -> Result<Channel, AppError> {
        let response = self
            .http
            .get(self.channel_url())
            .header(AUTHORIZATION, self.auth_header())
            .send()
            .await
            .map_err(|e| AppError::DiscordApi(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::ChannelNotFound(self.channel_id.clone()));
        }

        response
            .json::<Channel>()
            .await
            .map_err(|e| AppError::DiscordApi(e.to_string()))
    }
}

#[async_trait]
impl Notifier for DiscordClient {
    async fn send(&self, embed: &Embed) -> Result<(), AppError> {
        self.http
            .post(self.messages_url())
            .header(AUTHORIZATION, self.auth_header())
            .json(&MessagePayload { embeds: [embed] })
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| AppError::Delivery(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{embeds::EmbedFooter, *};

    #[test]
    fn test_urls() {
        let client = DiscordClient::new(
            "https://discord.com/api/v10/".to_string(),
            "secret".to_string(),
            "123".to_string(),
        );

        assert_eq!(client.channel_url(), "https://discord.com/api/v10/channels/123");
        assert_eq!(
            client.messages_url(),
            "https://discord.com/api/v10/channels/123/messages"
        );
        assert_eq!(client.auth_header(), "Bot secret");
    }

    #[test]
    fn test_message_payload() {
        let embed = Embed {
            title: "Redemption on Ethereum".to_string(),
            url: None,
            color: embeds::colors::REDEMPTION,
            fields: Vec::new(),
            footer: EmbedFooter {
                text: "Gravita Protocol".to_string(),
            },
            timestamp: "2024-01-01T00:00:00+00:00".to_string(),
        };

        let json = serde_json::to_value(MessagePayload { embeds: [&embed] }).unwrap();

        assert_eq!(json["embeds"].as_array().map(Vec::len), Some(1));
        assert_eq!(json["embeds"][0]["title"], "Redemption on Ethereum");
        assert!(json["embeds"][0].get("url").is_none());
    }
}
