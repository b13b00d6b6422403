/// Video service - listing, fetch with view counting, create, update,
/// delete with cascade, publish toggle.
use crate::db::video_repo::{self, VideoChanges, VideoListQuery};
use crate::error::{AppError, Result};
use crate::media::{MediaAsset, MediaStore, ResourceKind};
use crate::middleware::ensure_owner;
use crate::models::{Video, VideoResponse};
use sqlx::PgPool;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// Replacement input for `update_video`; every field optional, but at
/// least one must be present.
#[derive(Debug, Default)]
pub struct VideoUpdateInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub video_file: Option<PathBuf>,
    pub thumbnail_file: Option<PathBuf>,
}

impl VideoUpdateInput {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.video_file.is_none()
            && self.thumbnail_file.is_none()
    }
}

pub struct VideoService {
    pool: PgPool,
    media: Arc<dyn MediaStore>,
}

impl VideoService {
    pub fn new(pool: PgPool, media: Arc<dyn MediaStore>) -> Self {
        Self { pool, media }
    }

    /// List videos with filters, sorting, and pagination
    pub async fn list_videos(&self, query: &VideoListQuery) -> Result<Vec<VideoResponse>> {
        let rows = video_repo::list_videos(&self.pool, query).await?;
        Ok(rows.into_iter().map(VideoResponse::from).collect())
    }

    /// Fetch a video by id, counting the view.
    ///
    /// The counter bump is part of the fetch statement, so concurrent
    /// fetches each add exactly one.
    pub async fn get_video(&self, video_id: Uuid) -> Result<VideoResponse> {
        let row = video_repo::bump_views_and_fetch(&self.pool, video_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("video {video_id} not found")))?;

        Ok(row.into())
    }

    /// Create a video: upload both assets first, persist only when both
    /// uploads yielded a URL.
    pub async fn create_video(
        &self,
        owner_id: Uuid,
        title: &str,
        description: &str,
        video_file: &Path,
        thumbnail_file: &Path,
    ) -> Result<VideoResponse> {
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() {
            return Err(AppError::BadRequest("title is required".to_string()));
        }
        if description.is_empty() {
            return Err(AppError::BadRequest("description is required".to_string()));
        }

        let (video_asset, thumb_asset) =
            upload_video_pair(self.media.as_ref(), video_file, thumbnail_file).await?;

        let video = video_repo::insert_video(
            &self.pool,
            owner_id,
            title,
            description,
            &video_asset.url,
            &video_asset.public_id,
            &thumb_asset.url,
            &thumb_asset.public_id,
            video_asset.duration.unwrap_or(0.0),
        )
        .await?;

        self.fetch_response(video.id).await
    }

    /// Update fields and/or replace assets. Replacement assets are
    /// uploaded first; the previous asset is deleted best-effort only
    /// after the row is updated, so a failed upload never loses data.
    pub async fn update_video(
        &self,
        caller_id: Uuid,
        video_id: Uuid,
        input: VideoUpdateInput,
    ) -> Result<VideoResponse> {
        let video = self.fetch_owned(video_id, caller_id).await?;

        if input.is_empty() {
            return Err(AppError::BadRequest(
                "at least one field must be supplied".to_string(),
            ));
        }

        let mut changes = VideoChanges::default();

        if let Some(title) = input.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(AppError::BadRequest("title cannot be empty".to_string()));
            }
            changes.title = Some(title);
        }

        if let Some(description) = input.description {
            let description = description.trim().to_string();
            if description.is_empty() {
                return Err(AppError::BadRequest(
                    "description cannot be empty".to_string(),
                ));
            }
            changes.description = Some(description);
        }

        if let Some(path) = &input.video_file {
            let asset = self.media.upload(path, ResourceKind::Video).await?;
            apply_video_asset(&mut changes, asset);
        }

        if let Some(path) = &input.thumbnail_file {
            let asset = self.media.upload(path, ResourceKind::Image).await?;
            changes.thumbnail_url = Some(asset.url);
            changes.thumbnail_public_id = Some(asset.public_id);
        }

        video_repo::update_video(&self.pool, video_id, &changes).await?;

        if changes.video_public_id.is_some() {
            best_effort_delete(self.media.as_ref(), &video.video_public_id, ResourceKind::Video)
                .await;
        }
        if changes.thumbnail_public_id.is_some() {
            best_effort_delete(
                self.media.as_ref(),
                &video.thumbnail_public_id,
                ResourceKind::Image,
            )
            .await;
        }

        self.fetch_response(video_id).await
    }

    /// Delete a video, its likes, and its comments. The row cascade runs
    /// in one transaction; media cleanup is best-effort afterwards.
    pub async fn delete_video(&self, caller_id: Uuid, video_id: Uuid) -> Result<()> {
        let video = self.fetch_owned(video_id, caller_id).await?;

        let affected = video_repo::delete_video_cascade(&self.pool, video_id).await?;
        if affected == 0 {
            return Err(AppError::Internal(format!(
                "video {video_id} delete affected no rows"
            )));
        }

        best_effort_delete(self.media.as_ref(), &video.video_public_id, ResourceKind::Video).await;
        best_effort_delete(
            self.media.as_ref(),
            &video.thumbnail_public_id,
            ResourceKind::Image,
        )
        .await;

        Ok(())
    }

    /// Flip the published flag, returning the new value
    pub async fn toggle_publish(&self, caller_id: Uuid, video_id: Uuid) -> Result<bool> {
        self.fetch_owned(video_id, caller_id).await?;

        video_repo::toggle_publish(&self.pool, video_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("video {video_id} vanished during publish toggle"))
            })
    }

    async fn fetch_owned(&self, video_id: Uuid, caller_id: Uuid) -> Result<Video> {
        let video = video_repo::fetch_video(&self.pool, video_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("video {video_id} not found")))?;

        ensure_owner(video.owner_id, caller_id, "video")?;
        Ok(video)
    }

    async fn fetch_response(&self, video_id: Uuid) -> Result<VideoResponse> {
        video_repo::fetch_with_owner(&self.pool, video_id)
            .await?
            .map(VideoResponse::from)
            .ok_or_else(|| AppError::Internal(format!("video {video_id} missing after write")))
    }
}

/// Fold a replacement video asset into the pending changes. A new video
/// file always rewrites the duration; when the media host reports none
/// it becomes zero rather than keeping the previous asset's value.
pub(crate) fn apply_video_asset(changes: &mut VideoChanges, asset: MediaAsset) {
    changes.duration = Some(asset.duration.unwrap_or(0.0));
    changes.video_url = Some(asset.url);
    changes.video_public_id = Some(asset.public_id);
}

/// Upload the video/thumbnail pair for a new record. If the thumbnail
/// upload fails after the video succeeded, the orphaned video asset is
/// deleted best-effort before the error propagates.
pub(crate) async fn upload_video_pair(
    media: &dyn MediaStore,
    video_file: &Path,
    thumbnail_file: &Path,
) -> Result<(MediaAsset, MediaAsset)> {
    let video_asset = media.upload(video_file, ResourceKind::Video).await?;

    match media.upload(thumbnail_file, ResourceKind::Image).await {
        Ok(thumb_asset) => Ok((video_asset, thumb_asset)),
        Err(err) => {
            best_effort_delete(media, &video_asset.public_id, ResourceKind::Video).await;
            Err(err)
        }
    }
}

/// Delete a media asset, logging failures instead of propagating them.
/// Orphaned assets on the media host are accepted over failing the
/// caller's request.
pub(crate) async fn best_effort_delete(media: &dyn MediaStore, public_id: &str, kind: ResourceKind) {
    if let Err(err) = media.delete(public_id, kind).await {
        tracing::warn!(public_id = %public_id, error = %err, "media asset cleanup failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MockMediaStore;
    use mockall::predicate::eq;

    fn asset(public_id: &str) -> MediaAsset {
        MediaAsset {
            url: format!("https://media.test/{public_id}"),
            public_id: public_id.to_string(),
            duration: Some(12.5),
        }
    }

    #[tokio::test]
    async fn upload_pair_returns_both_assets() {
        let mut media = MockMediaStore::new();
        media
            .expect_upload()
            .withf(|_, kind| *kind == ResourceKind::Video)
            .times(1)
            .returning(|_, _| Ok(asset("vid-1")));
        media
            .expect_upload()
            .withf(|_, kind| *kind == ResourceKind::Image)
            .times(1)
            .returning(|_, _| Ok(asset("thumb-1")));
        media.expect_delete().times(0);

        let (video, thumb) = upload_video_pair(
            &media,
            Path::new("/tmp/v.mp4"),
            Path::new("/tmp/t.png"),
        )
        .await
        .unwrap();

        assert_eq!(video.public_id, "vid-1");
        assert_eq!(thumb.public_id, "thumb-1");
    }

    #[tokio::test]
    async fn failed_video_upload_aborts_before_thumbnail() {
        let mut media = MockMediaStore::new();
        media
            .expect_upload()
            .withf(|_, kind| *kind == ResourceKind::Video)
            .times(1)
            .returning(|_, _| Err(AppError::MediaStore("boom".to_string())));
        media.expect_delete().times(0);

        let result = upload_video_pair(
            &media,
            Path::new("/tmp/v.mp4"),
            Path::new("/tmp/t.png"),
        )
        .await;

        assert!(matches!(result, Err(AppError::MediaStore(_))));
    }

    #[tokio::test]
    async fn failed_thumbnail_upload_cleans_up_video_asset() {
        let mut media = MockMediaStore::new();
        media
            .expect_upload()
            .withf(|_, kind| *kind == ResourceKind::Video)
            .times(1)
            .returning(|_, _| Ok(asset("vid-1")));
        media
            .expect_upload()
            .withf(|_, kind| *kind == ResourceKind::Image)
            .times(1)
            .returning(|_, _| Err(AppError::MediaStore("boom".to_string())));
        media
            .expect_delete()
            .with(eq("vid-1"), eq(ResourceKind::Video))
            .times(1)
            .returning(|_, _| Ok(()));

        let result = upload_video_pair(
            &media,
            Path::new("/tmp/v.mp4"),
            Path::new("/tmp/t.png"),
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn best_effort_delete_swallows_errors() {
        let mut media = MockMediaStore::new();
        media
            .expect_delete()
            .times(1)
            .returning(|_, _| Err(AppError::MediaStore("unreachable".to_string())));

        best_effort_delete(&media, "vid-1", ResourceKind::Video).await;
    }

    #[test]
    fn replacement_video_without_duration_resets_to_zero() {
        let mut changes = VideoChanges::default();
        apply_video_asset(
            &mut changes,
            MediaAsset {
                url: "https://media.test/vid-2".to_string(),
                public_id: "vid-2".to_string(),
                duration: None,
            },
        );

        assert_eq!(changes.duration, Some(0.0));
        assert_eq!(changes.video_public_id.as_deref(), Some("vid-2"));
    }

    #[test]
    fn replacement_video_carries_reported_duration() {
        let mut changes = VideoChanges::default();
        apply_video_asset(&mut changes, asset("vid-3"));
        assert_eq!(changes.duration, Some(12.5));
    }

    #[test]
    fn empty_update_input_detected() {
        assert!(VideoUpdateInput::default().is_empty());
        let input = VideoUpdateInput {
            title: Some("t".to_string()),
            ..Default::default()
        };
        assert!(!input.is_empty());
    }
}
