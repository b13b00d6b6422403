/// Data models for the vidstream service
///
/// Entity structs map 1:1 onto Postgres rows (`sqlx::FromRow`). The `*Row`
/// structs are flattened owner-joined projections produced by the
/// repositories; the `*Response` structs are the shapes handed to clients,
/// with the owner reshaped into a nested public profile and the opaque
/// media references stripped.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Video entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Video {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub video_public_id: String,
    pub thumbnail_url: String,
    pub thumbnail_public_id: String,
    pub duration: f64,
    pub views: i64,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub video_id: Uuid,
    pub owner_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Like entity - references exactly one of a video or a comment.
///
/// Comment likes additionally carry the owning video id so video-scoped
/// cleanup needs no extra join.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub video_id: Uuid,
    pub comment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Subscription entity - subscriber follows a channel (both users)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subscription {
    pub id: Uuid,
    pub subscriber_id: Uuid,
    pub channel_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Public profile fields of a user, as exposed by owner joins
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChannelProfile {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

/// Flattened video row with owner profile columns joined in
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VideoWithOwnerRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration: f64,
    pub views: i64,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_username: String,
    pub owner_full_name: String,
    pub owner_avatar_url: Option<String>,
}

/// Video shape returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct VideoResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration: f64,
    pub views: i64,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner: ChannelProfile,
}

impl From<VideoWithOwnerRow> for VideoResponse {
    fn from(row: VideoWithOwnerRow) -> Self {
        VideoResponse {
            id: row.id,
            title: row.title,
            description: row.description,
            video_url: row.video_url,
            thumbnail_url: row.thumbnail_url,
            duration: row.duration,
            views: row.views,
            published: row.published,
            created_at: row.created_at,
            updated_at: row.updated_at,
            owner: ChannelProfile {
                id: row.owner_id,
                username: row.owner_username,
                full_name: row.owner_full_name,
                avatar_url: row.owner_avatar_url,
            },
        }
    }
}

/// Flattened comment row with owner profile and video summary joined in
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentWithContextRow {
    pub id: Uuid,
    pub video_id: Uuid,
    pub owner_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_username: String,
    pub owner_full_name: String,
    pub owner_avatar_url: Option<String>,
    pub video_title: String,
    pub video_thumbnail_url: String,
}

/// Comment shape returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner: ChannelProfile,
    pub video: CommentVideoSummary,
}

/// Minimal video fields attached to a comment response
#[derive(Debug, Clone, Serialize)]
pub struct CommentVideoSummary {
    pub id: Uuid,
    pub title: String,
    pub thumbnail_url: String,
}

impl From<CommentWithContextRow> for CommentResponse {
    fn from(row: CommentWithContextRow) -> Self {
        CommentResponse {
            id: row.id,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
            owner: ChannelProfile {
                id: row.owner_id,
                username: row.owner_username,
                full_name: row.owner_full_name,
                avatar_url: row.owner_avatar_url,
            },
            video: CommentVideoSummary {
                id: row.video_id,
                title: row.video_title,
                thumbnail_url: row.video_thumbnail_url,
            },
        }
    }
}

/// Pagination metadata attached to paged listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMeta {
    pub total_items: i64,
    pub total_pages: i64,
    pub page: i64,
    pub limit: i64,
    pub next_page: Option<i64>,
    pub prev_page: Option<i64>,
}

impl PageMeta {
    pub fn new(total_items: i64, page: i64, limit: i64) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + limit - 1) / limit
        };
        PageMeta {
            total_items,
            total_pages,
            page,
            limit,
            next_page: (page < total_pages).then_some(page + 1),
            prev_page: (page > 1 && total_pages > 0).then_some((page - 1).min(total_pages)),
        }
    }
}

/// A page of items plus its metadata
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_meta_exact_multiple() {
        let meta = PageMeta::new(10, 1, 5);
        assert_eq!(meta.total_pages, 2);
        assert_eq!(meta.next_page, Some(2));
        assert_eq!(meta.prev_page, None);
    }

    #[test]
    fn page_meta_partial_last_page() {
        let meta = PageMeta::new(11, 3, 5);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.next_page, None);
        assert_eq!(meta.prev_page, Some(2));
    }

    #[test]
    fn page_meta_empty() {
        let meta = PageMeta::new(0, 1, 20);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.next_page, None);
        assert_eq!(meta.prev_page, None);
    }

    #[test]
    fn page_meta_middle_page() {
        let meta = PageMeta::new(25, 2, 5);
        assert_eq!(meta.total_pages, 5);
        assert_eq!(meta.next_page, Some(3));
        assert_eq!(meta.prev_page, Some(1));
    }
}
