use crate::models::VideoWithOwnerRow;
use sqlx::PgPool;
use uuid::Uuid;

/// Toggle a like on a video. Returns the resulting state: true when the
/// like now exists, false when it was removed.
///
/// Delete-then-insert keeps the toggle atomic per branch: the partial
/// unique index on `(user_id, video_id)` makes concurrent duplicate
/// inserts collapse into one row, so the at-most-one invariant holds even
/// when two requests race.
pub async fn toggle_video_like(
    pool: &PgPool,
    user_id: Uuid,
    video_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let removed = sqlx::query(
        "DELETE FROM likes WHERE user_id = $1 AND video_id = $2 AND comment_id IS NULL",
    )
    .bind(user_id)
    .bind(video_id)
    .execute(pool)
    .await?
    .rows_affected();

    if removed > 0 {
        return Ok(false);
    }

    sqlx::query(
        r#"
        INSERT INTO likes (user_id, video_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, video_id) WHERE comment_id IS NULL DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(video_id)
    .execute(pool)
    .await?;

    Ok(true)
}

/// Toggle a like on a comment. The insert pulls the owning video id from
/// the comment row so the like carries the denormalized reference.
pub async fn toggle_comment_like(
    pool: &PgPool,
    user_id: Uuid,
    comment_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let removed = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND comment_id = $2")
        .bind(user_id)
        .bind(comment_id)
        .execute(pool)
        .await?
        .rows_affected();

    if removed > 0 {
        return Ok(false);
    }

    sqlx::query(
        r#"
        INSERT INTO likes (user_id, comment_id, video_id)
        SELECT $1, c.id, c.video_id FROM comments c WHERE c.id = $2
        ON CONFLICT (user_id, comment_id) WHERE comment_id IS NOT NULL DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(comment_id)
    .execute(pool)
    .await?;

    Ok(true)
}

/// Videos the user has liked, most recent like first, owner-joined.
/// Restricted to video-targeted likes; comment likes are excluded.
pub async fn list_liked_videos(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<VideoWithOwnerRow>, sqlx::Error> {
    sqlx::query_as::<_, VideoWithOwnerRow>(
        r#"
        SELECT v.id, v.owner_id, v.title, v.description, v.video_url, v.thumbnail_url,
               v.duration, v.views, v.published, v.created_at, v.updated_at,
               u.username AS owner_username, u.full_name AS owner_full_name,
               u.avatar_url AS owner_avatar_url
        FROM likes l
        JOIN videos v ON v.id = l.video_id
        JOIN users u ON u.id = v.owner_id
        WHERE l.user_id = $1 AND l.comment_id IS NULL
        ORDER BY l.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
