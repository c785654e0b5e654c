pub mod discord;

use async_trait::async_trait;

use crate::error::Result;

pub use discord::DiscordPublisher;

/// Trait for leaderboard publishing targets (Discord, etc.)
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Deliver a message; fails on transport errors or non-2xx responses
    async fn publish(&self, message: &str) -> Result<()>;

    /// Get publisher name for logging
    fn name(&self) -> &str;
}
