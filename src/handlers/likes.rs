/// Like handlers - toggle endpoints and the liked-videos listing
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::LikeService;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use super::ok;

/// Toggle the caller's like on a video
pub async fn toggle_video_like(
    pool: web::Data<PgPool>,
    video_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = LikeService::new((**pool).clone());
    let is_liked = service.toggle_video_like(user_id.0, *video_id).await?;

    Ok(ok(
        serde_json::json!({ "isLiked": is_liked }),
        "video like toggled",
    ))
}

/// Toggle the caller's like on a comment
pub async fn toggle_comment_like(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = LikeService::new((**pool).clone());
    let is_liked = service.toggle_comment_like(user_id.0, *comment_id).await?;

    Ok(ok(
        serde_json::json!({ "isLiked": is_liked }),
        "comment like toggled",
    ))
}

/// List the videos the caller has liked
pub async fn list_liked_videos(
    pool: web::Data<PgPool>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = LikeService::new((**pool).clone());
    let videos = service.list_liked_videos(user_id.0).await?;

    Ok(ok(videos, "liked videos fetched"))
}
