/// Comment handlers - HTTP endpoints for comment operations
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::services::CommentService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use super::{created, ok};

#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Request body for creating a comment
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "content must be 1-2000 characters"))]
    pub content: String,
}

/// Request body for updating a comment
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "content must be 1-2000 characters"))]
    pub content: String,
}

/// Get comments for a video, newest first, with pagination metadata
pub async fn list_comments(
    pool: web::Data<PgPool>,
    video_id: web::Path<Uuid>,
    _user_id: UserId,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let page = service
        .list_comments(*video_id, query.page, query.limit)
        .await?;

    Ok(ok(page, "comments fetched"))
}

/// Create a new comment on a video
pub async fn create_comment(
    pool: web::Data<PgPool>,
    video_id: web::Path<Uuid>,
    user_id: UserId,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let service = CommentService::new((**pool).clone());
    let comment = service
        .create_comment(*video_id, user_id.0, &req.content)
        .await?;

    Ok(created(comment, "comment added"))
}

/// Update an owned comment
pub async fn update_comment(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
    user_id: UserId,
    req: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let service = CommentService::new((**pool).clone());
    let comment = service
        .update_comment(*comment_id, user_id.0, &req.content)
        .await?;

    Ok(ok(comment, "comment updated"))
}

/// Delete an owned comment and its likes
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    service.delete_comment(*comment_id, user_id.0).await?;

    Ok(ok(serde_json::json!({ "deleted": true }), "comment deleted"))
}
