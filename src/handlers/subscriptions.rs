/// Subscription handlers - toggle and the two symmetric listings
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::SubscriptionService;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use super::ok;

/// Toggle the caller's subscription to a channel
pub async fn toggle_subscription(
    pool: web::Data<PgPool>,
    channel_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = SubscriptionService::new((**pool).clone());
    let state = service.toggle(user_id.0, *channel_id).await?;

    Ok(ok(state, "subscription toggled"))
}

/// List the subscribers of a channel
pub async fn list_subscribers(
    pool: web::Data<PgPool>,
    channel_id: web::Path<Uuid>,
    _user_id: UserId,
) -> Result<HttpResponse> {
    let service = SubscriptionService::new((**pool).clone());
    let subscribers = service.list_subscribers(*channel_id).await?;

    Ok(ok(subscribers, "subscribers fetched"))
}

/// List the channels a user is subscribed to
pub async fn list_subscribed_channels(
    pool: web::Data<PgPool>,
    subscriber_id: web::Path<Uuid>,
    _user_id: UserId,
) -> Result<HttpResponse> {
    let service = SubscriptionService::new((**pool).clone());
    let channels = service.list_subscribed_channels(*subscriber_id).await?;

    Ok(ok(channels, "subscriptions fetched"))
}
