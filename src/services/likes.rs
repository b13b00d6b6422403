/// Like service - idempotent toggles for videos and comments, plus the
/// liked-videos listing.
use crate::db::{comment_repo, like_repo, video_repo};
use crate::error::{AppError, Result};
use crate::models::VideoResponse;
use sqlx::PgPool;
use uuid::Uuid;

pub struct LikeService {
    pool: PgPool,
}

impl LikeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Toggle the caller's like on a video. Returns the resulting state.
    pub async fn toggle_video_like(&self, user_id: Uuid, video_id: Uuid) -> Result<bool> {
        if !video_repo::video_exists(&self.pool, video_id).await? {
            return Err(AppError::NotFound(format!("video {video_id} not found")));
        }

        Ok(like_repo::toggle_video_like(&self.pool, user_id, video_id).await?)
    }

    /// Toggle the caller's like on a comment. Returns the resulting state.
    pub async fn toggle_comment_like(&self, user_id: Uuid, comment_id: Uuid) -> Result<bool> {
        if !comment_repo::comment_exists(&self.pool, comment_id).await? {
            return Err(AppError::NotFound(format!(
                "comment {comment_id} not found"
            )));
        }

        Ok(like_repo::toggle_comment_like(&self.pool, user_id, comment_id).await?)
    }

    /// Videos the caller has liked, most recent first. Empty result is an
    /// empty list, never an error.
    pub async fn list_liked_videos(&self, user_id: Uuid) -> Result<Vec<VideoResponse>> {
        let rows = like_repo::list_liked_videos(&self.pool, user_id).await?;
        Ok(rows.into_iter().map(VideoResponse::from).collect())
    }
}
