use crate::models::{Video, VideoWithOwnerRow};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// Columns selected for an owner-joined video row.
const VIDEO_OWNER_COLUMNS: &str = r#"
    v.id, v.owner_id, v.title, v.description, v.video_url, v.thumbnail_url,
    v.duration, v.views, v.published, v.created_at, v.updated_at,
    u.username AS owner_username, u.full_name AS owner_full_name,
    u.avatar_url AS owner_avatar_url
"#;

const VIDEO_COLUMNS: &str = r#"
    id, owner_id, title, description, video_url, video_public_id,
    thumbnail_url, thumbnail_public_id, duration, views, published,
    created_at, updated_at
"#;

/// Whitelisted sort keys for video listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    Views,
    Duration,
    Title,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "created_at" | "createdAt" => Some(SortKey::CreatedAt),
            "views" => Some(SortKey::Views),
            "duration" => Some(SortKey::Duration),
            "title" => Some(SortKey::Title),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            SortKey::CreatedAt => "v.created_at",
            SortKey::Views => "v.views",
            SortKey::Duration => "v.duration",
            SortKey::Title => "v.title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" | "ascending" | "1" => Some(SortDirection::Asc),
            "desc" | "descending" | "-1" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Validated listing parameters, assembled once per request.
///
/// `viewer` controls visibility: unpublished videos only surface to their
/// owner.
#[derive(Debug, Clone)]
pub struct VideoListQuery {
    pub search: Option<String>,
    pub owner_id: Option<Uuid>,
    pub sort_key: SortKey,
    pub sort_dir: SortDirection,
    pub page: i64,
    pub limit: i64,
    pub viewer: Option<Uuid>,
}

impl VideoListQuery {
    pub fn new(
        search: Option<String>,
        owner_id: Option<Uuid>,
        sort_key: SortKey,
        sort_dir: SortDirection,
        page: i64,
        limit: i64,
        viewer: Option<Uuid>,
    ) -> Self {
        VideoListQuery {
            search: search.filter(|s| !s.trim().is_empty()),
            owner_id,
            sort_key,
            sort_dir,
            page: page.max(1),
            limit: limit.clamp(1, 100),
            viewer,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// List videos with optional search and owner filters, owner-joined.
pub async fn list_videos(
    pool: &PgPool,
    query: &VideoListQuery,
) -> Result<Vec<VideoWithOwnerRow>, sqlx::Error> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
    qb.push(VIDEO_OWNER_COLUMNS)
        .push(" FROM videos v JOIN users u ON u.id = v.owner_id WHERE TRUE");

    if let Some(search) = &query.search {
        let pattern = format!("%{}%", search);
        qb.push(" AND (v.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR v.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(owner_id) = query.owner_id {
        qb.push(" AND v.owner_id = ").push_bind(owner_id);
    }

    match query.viewer {
        Some(viewer) => {
            qb.push(" AND (v.published = TRUE OR v.owner_id = ")
                .push_bind(viewer)
                .push(")");
        }
        None => {
            qb.push(" AND v.published = TRUE");
        }
    }

    qb.push(" ORDER BY ")
        .push(query.sort_key.column())
        .push(" ")
        .push(query.sort_dir.keyword())
        .push(" LIMIT ")
        .push_bind(query.limit)
        .push(" OFFSET ")
        .push_bind(query.offset());

    qb.build_query_as::<VideoWithOwnerRow>().fetch_all(pool).await
}

/// Fetch a video row without touching the view counter.
pub async fn fetch_video(pool: &PgPool, video_id: Uuid) -> Result<Option<Video>, sqlx::Error> {
    sqlx::query_as::<_, Video>(&format!(
        "SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1"
    ))
    .bind(video_id)
    .fetch_optional(pool)
    .await
}

pub async fn video_exists(pool: &PgPool, video_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM videos WHERE id = $1)")
        .bind(video_id)
        .fetch_one(pool)
        .await
}

/// Atomically bump the view counter and return the post-increment row,
/// owner-joined. A single statement so concurrent fetches each count.
pub async fn bump_views_and_fetch(
    pool: &PgPool,
    video_id: Uuid,
) -> Result<Option<VideoWithOwnerRow>, sqlx::Error> {
    let sql = format!(
        r#"
        WITH bumped AS (
            UPDATE videos
            SET views = views + 1
            WHERE id = $1
            RETURNING id, owner_id, title, description, video_url, thumbnail_url,
                      duration, views, published, created_at, updated_at
        )
        SELECT b.id, b.owner_id, b.title, b.description, b.video_url, b.thumbnail_url,
               b.duration, b.views, b.published, b.created_at, b.updated_at,
               u.username AS owner_username, u.full_name AS owner_full_name,
               u.avatar_url AS owner_avatar_url
        FROM bumped b
        JOIN users u ON u.id = b.owner_id
        "#
    );

    sqlx::query_as::<_, VideoWithOwnerRow>(&sql)
        .bind(video_id)
        .fetch_optional(pool)
        .await
}

/// Fetch a video owner-joined without the view side effect.
pub async fn fetch_with_owner(
    pool: &PgPool,
    video_id: Uuid,
) -> Result<Option<VideoWithOwnerRow>, sqlx::Error> {
    let sql = format!(
        "SELECT {VIDEO_OWNER_COLUMNS} FROM videos v JOIN users u ON u.id = v.owner_id WHERE v.id = $1"
    );

    sqlx::query_as::<_, VideoWithOwnerRow>(&sql)
        .bind(video_id)
        .fetch_optional(pool)
        .await
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_video(
    pool: &PgPool,
    owner_id: Uuid,
    title: &str,
    description: &str,
    video_url: &str,
    video_public_id: &str,
    thumbnail_url: &str,
    thumbnail_public_id: &str,
    duration: f64,
) -> Result<Video, sqlx::Error> {
    let sql = format!(
        r#"
        INSERT INTO videos (owner_id, title, description, video_url, video_public_id,
                            thumbnail_url, thumbnail_public_id, duration)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {VIDEO_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Video>(&sql)
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .bind(video_url)
        .bind(video_public_id)
        .bind(thumbnail_url)
        .bind(thumbnail_public_id)
        .bind(duration)
        .fetch_one(pool)
        .await
}

/// Field replacements applied by `update_video`. `None` keeps the stored
/// value.
#[derive(Debug, Default, Clone)]
pub struct VideoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub video_public_id: Option<String>,
    pub thumbnail_url: Option<String>,
    pub thumbnail_public_id: Option<String>,
    pub duration: Option<f64>,
}

pub async fn update_video(
    pool: &PgPool,
    video_id: Uuid,
    changes: &VideoChanges,
) -> Result<Video, sqlx::Error> {
    let sql = format!(
        r#"
        UPDATE videos SET
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            video_url = COALESCE($4, video_url),
            video_public_id = COALESCE($5, video_public_id),
            thumbnail_url = COALESCE($6, thumbnail_url),
            thumbnail_public_id = COALESCE($7, thumbnail_public_id),
            duration = COALESCE($8, duration),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {VIDEO_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Video>(&sql)
        .bind(video_id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.video_url)
        .bind(&changes.video_public_id)
        .bind(&changes.thumbnail_url)
        .bind(&changes.thumbnail_public_id)
        .bind(changes.duration)
        .fetch_one(pool)
        .await
}

/// Delete a video together with its likes and comments in one transaction.
///
/// Likes are matched on the denormalized `video_id`, which covers both
/// direct video likes and likes on the video's comments. Returns the
/// number of video rows removed.
pub async fn delete_video_cascade(pool: &PgPool, video_id: Uuid) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM likes WHERE video_id = $1")
        .bind(video_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM comments WHERE video_id = $1")
        .bind(video_id)
        .execute(&mut *tx)
        .await?;

    let affected = sqlx::query("DELETE FROM videos WHERE id = $1")
        .bind(video_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok(affected)
}

/// Atomically flip the published flag, returning the new value.
pub async fn toggle_publish(pool: &PgPool, video_id: Uuid) -> Result<Option<bool>, sqlx::Error> {
    sqlx::query_scalar(
        "UPDATE videos SET published = NOT published, updated_at = NOW() WHERE id = $1 RETURNING published",
    )
    .bind(video_id)
    .fetch_optional(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_parses_known_fields() {
        assert_eq!(SortKey::parse("created_at"), Some(SortKey::CreatedAt));
        assert_eq!(SortKey::parse("createdAt"), Some(SortKey::CreatedAt));
        assert_eq!(SortKey::parse("views"), Some(SortKey::Views));
        assert_eq!(SortKey::parse("duration"), Some(SortKey::Duration));
        assert_eq!(SortKey::parse("title"), Some(SortKey::Title));
        assert_eq!(SortKey::parse("owner_id"), None);
        assert_eq!(SortKey::parse("views; DROP TABLE videos"), None);
    }

    #[test]
    fn sort_direction_parses_aliases() {
        assert_eq!(SortDirection::parse("asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse("1"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse("desc"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("-1"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("sideways"), None);
    }

    #[test]
    fn list_query_clamps_pagination() {
        let q = VideoListQuery::new(
            None,
            None,
            SortKey::CreatedAt,
            SortDirection::Desc,
            0,
            1000,
            None,
        );
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 100);
        assert_eq!(q.offset(), 0);

        let q = VideoListQuery::new(
            None,
            None,
            SortKey::CreatedAt,
            SortDirection::Desc,
            2,
            5,
            None,
        );
        assert_eq!(q.offset(), 5);
    }

    #[test]
    fn list_query_drops_blank_search() {
        let q = VideoListQuery::new(
            Some("   ".to_string()),
            None,
            SortKey::CreatedAt,
            SortDirection::Desc,
            1,
            10,
            None,
        );
        assert!(q.search.is_none());
    }
}
