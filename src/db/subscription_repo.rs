use crate::models::ChannelProfile;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn user_exists(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// Toggle a subscription. Returns true when the caller is now subscribed,
/// false when the subscription was removed. The unique constraint on
/// `(subscriber_id, channel_id)` absorbs concurrent duplicate inserts.
pub async fn toggle_subscription(
    pool: &PgPool,
    subscriber_id: Uuid,
    channel_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let removed = sqlx::query(
        "DELETE FROM subscriptions WHERE subscriber_id = $1 AND channel_id = $2",
    )
    .bind(subscriber_id)
    .bind(channel_id)
    .execute(pool)
    .await?
    .rows_affected();

    if removed > 0 {
        return Ok(false);
    }

    sqlx::query(
        r#"
        INSERT INTO subscriptions (subscriber_id, channel_id)
        VALUES ($1, $2)
        ON CONFLICT (subscriber_id, channel_id) DO NOTHING
        "#,
    )
    .bind(subscriber_id)
    .bind(channel_id)
    .execute(pool)
    .await?;

    Ok(true)
}

/// Public profiles of everyone subscribed to a channel
pub async fn list_subscribers(
    pool: &PgPool,
    channel_id: Uuid,
) -> Result<Vec<ChannelProfile>, sqlx::Error> {
    sqlx::query_as::<_, ChannelProfile>(
        r#"
        SELECT u.id, u.username, u.full_name, u.avatar_url
        FROM subscriptions s
        JOIN users u ON u.id = s.subscriber_id
        WHERE s.channel_id = $1
        ORDER BY s.created_at DESC
        "#,
    )
    .bind(channel_id)
    .fetch_all(pool)
    .await
}

/// Public profiles of the channels a user is subscribed to
pub async fn list_subscribed_channels(
    pool: &PgPool,
    subscriber_id: Uuid,
) -> Result<Vec<ChannelProfile>, sqlx::Error> {
    sqlx::query_as::<_, ChannelProfile>(
        r#"
        SELECT u.id, u.username, u.full_name, u.avatar_url
        FROM subscriptions s
        JOIN users u ON u.id = s.channel_id
        WHERE s.subscriber_id = $1
        ORDER BY s.created_at DESC
        "#,
    )
    .bind(subscriber_id)
    .fetch_all(pool)
    .await
}
