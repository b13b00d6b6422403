/// Comment service - paginated listing, creation, ownership-checked
/// update and delete with like cascade.
use crate::db::{comment_repo, video_repo};
use crate::error::{AppError, Result};
use crate::middleware::ensure_owner;
use crate::models::{CommentResponse, PageMeta, Paginated};
use sqlx::PgPool;
use uuid::Uuid;

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Page through a video's comments, newest first, with pagination
    /// metadata.
    pub async fn list_comments(
        &self,
        video_id: Uuid,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Paginated<CommentResponse>> {
        if !video_repo::video_exists(&self.pool, video_id).await? {
            return Err(AppError::NotFound(format!("video {video_id} not found")));
        }

        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * limit;

        let rows = comment_repo::list_by_video(&self.pool, video_id, limit, offset).await?;
        let total = comment_repo::count_by_video(&self.pool, video_id).await?;

        Ok(Paginated {
            items: rows.into_iter().map(CommentResponse::from).collect(),
            meta: PageMeta::new(total, page, limit),
        })
    }

    pub async fn create_comment(
        &self,
        video_id: Uuid,
        owner_id: Uuid,
        content: &str,
    ) -> Result<CommentResponse> {
        let content = validated_content(content)?;

        if !video_repo::video_exists(&self.pool, video_id).await? {
            return Err(AppError::NotFound(format!("video {video_id} not found")));
        }

        let comment = comment_repo::insert_comment(&self.pool, video_id, owner_id, content).await?;
        self.fetch_response(comment.id).await
    }

    pub async fn update_comment(
        &self,
        comment_id: Uuid,
        caller_id: Uuid,
        content: &str,
    ) -> Result<CommentResponse> {
        let content = validated_content(content)?;

        let comment = comment_repo::fetch_comment(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("comment {comment_id} not found")))?;

        ensure_owner(comment.owner_id, caller_id, "comment")?;

        let affected = comment_repo::update_content(&self.pool, comment_id, content).await?;
        if affected == 0 {
            return Err(AppError::Internal(format!(
                "comment {comment_id} update affected no rows"
            )));
        }

        self.fetch_response(comment_id).await
    }

    /// Delete a comment, cascading removal of its likes
    pub async fn delete_comment(&self, comment_id: Uuid, caller_id: Uuid) -> Result<()> {
        let comment = comment_repo::fetch_comment(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("comment {comment_id} not found")))?;

        ensure_owner(comment.owner_id, caller_id, "comment")?;

        let affected = comment_repo::delete_comment_cascade(&self.pool, comment_id).await?;
        if affected == 0 {
            return Err(AppError::Internal(format!(
                "comment {comment_id} delete affected no rows"
            )));
        }

        Ok(())
    }

    async fn fetch_response(&self, comment_id: Uuid) -> Result<CommentResponse> {
        comment_repo::fetch_with_context(&self.pool, comment_id)
            .await?
            .map(CommentResponse::from)
            .ok_or_else(|| AppError::Internal(format!("comment {comment_id} missing after write")))
    }
}

fn validated_content(content: &str) -> Result<&str> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(
            "comment content cannot be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_content_rejected() {
        assert!(matches!(
            validated_content("   \n\t  "),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn content_is_trimmed() {
        assert_eq!(validated_content("  hello  ").unwrap(), "hello");
    }
}
