use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::{DraftError, Result};
use crate::publisher::Publisher;

/// Publishes leaderboard messages to a Discord bot endpoint
pub struct DiscordPublisher {
    client: Client,
    url: String,
}

#[derive(Debug, Serialize)]
struct PublishRequest<'a> {
    message: &'a str,
}

impl DiscordPublisher {
    /// Create a new Discord publisher for the given bot URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(DraftError::HttpRequest)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Publisher for DiscordPublisher {
    async fn publish(&self, message: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&PublishRequest { message })
            .send()
            .await
            .map_err(|e| DraftError::Publish(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DraftError::Publish(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            )));
        }

        tracing::debug!(url = %self.url, "published message");
        Ok(())
    }

    fn name(&self) -> &str {
        "discord"
    }
}
