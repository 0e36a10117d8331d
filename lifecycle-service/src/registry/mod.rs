//! Active-streamer registry notifications
//!
//! Other dispatch logic in the platform keys off the set of currently-live
//! channels. This service only notifies the registry on live/offline
//! transitions; it never reads the set back.

use crate::error::Result;
use async_trait::async_trait;
use redis::aio::ConnectionManager;

/// Redis set holding the channel ids that are currently publishing.
pub const ACTIVE_STREAMERS_KEY: &str = "streams:active";

#[async_trait]
pub trait StreamRegistry: Send + Sync {
    async fn add_streamer(&self, channel_id: &str) -> Result<()>;
    async fn remove_streamer(&self, channel_id: &str) -> Result<()>;
}

/// Registry notifier backed by the platform-wide Redis active set.
#[derive(Clone)]
pub struct RedisStreamRegistry {
    manager: ConnectionManager,
}

impl RedisStreamRegistry {
    pub fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl StreamRegistry for RedisStreamRegistry {
    async fn add_streamer(&self, channel_id: &str) -> Result<()> {
        let mut conn = self.manager.clone();
        redis::cmd("SADD")
            .arg(ACTIVE_STREAMERS_KEY)
            .arg(channel_id)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn remove_streamer(&self, channel_id: &str) -> Result<()> {
        let mut conn = self.manager.clone();
        redis::cmd("SREM")
            .arg(ACTIVE_STREAMERS_KEY)
            .arg(channel_id)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }
}
