/// Subscription service - toggle subscribe/unsubscribe and the two
/// symmetric listings.
use crate::db::subscription_repo;
use crate::error::{AppError, Result};
use crate::models::ChannelProfile;
use sqlx::PgPool;
use uuid::Uuid;

/// Result of a subscription toggle
#[derive(Debug, Clone, serde::Serialize)]
pub struct SubscriptionState {
    pub channel_id: Uuid,
    pub subscribed: bool,
}

pub struct SubscriptionService {
    pool: PgPool,
}

impl SubscriptionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Toggle the caller's subscription to a channel. Self-subscription
    /// is always rejected.
    pub async fn toggle(&self, subscriber_id: Uuid, channel_id: Uuid) -> Result<SubscriptionState> {
        if subscriber_id == channel_id {
            return Err(AppError::BadRequest(
                "you cannot subscribe to your own channel".to_string(),
            ));
        }

        if !subscription_repo::user_exists(&self.pool, channel_id).await? {
            return Err(AppError::NotFound(format!(
                "channel {channel_id} not found"
            )));
        }

        let subscribed =
            subscription_repo::toggle_subscription(&self.pool, subscriber_id, channel_id).await?;

        Ok(SubscriptionState {
            channel_id,
            subscribed,
        })
    }

    /// Public profiles of a channel's subscribers
    pub async fn list_subscribers(&self, channel_id: Uuid) -> Result<Vec<ChannelProfile>> {
        if !subscription_repo::user_exists(&self.pool, channel_id).await? {
            return Err(AppError::NotFound(format!(
                "channel {channel_id} not found"
            )));
        }

        Ok(subscription_repo::list_subscribers(&self.pool, channel_id).await?)
    }

    /// Public profiles of the channels a user subscribes to
    pub async fn list_subscribed_channels(
        &self,
        subscriber_id: Uuid,
    ) -> Result<Vec<ChannelProfile>> {
        if !subscription_repo::user_exists(&self.pool, subscriber_id).await? {
            return Err(AppError::NotFound(format!(
                "user {subscriber_id} not found"
            )));
        }

        Ok(subscription_repo::list_subscribed_channels(&self.pool, subscriber_id).await?)
    }
}
