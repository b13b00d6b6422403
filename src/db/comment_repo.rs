use crate::models::{Comment, CommentWithContextRow};
use sqlx::PgPool;
use uuid::Uuid;

const COMMENT_CONTEXT_COLUMNS: &str = r#"
    c.id, c.video_id, c.owner_id, c.content, c.created_at, c.updated_at,
    u.username AS owner_username, u.full_name AS owner_full_name,
    u.avatar_url AS owner_avatar_url,
    v.title AS video_title, v.thumbnail_url AS video_thumbnail_url
"#;

const COMMENT_CONTEXT_FROM: &str = r#"
    FROM comments c
    JOIN users u ON u.id = c.owner_id
    JOIN videos v ON v.id = c.video_id
"#;

/// Get comments for a video, newest first, owner-joined
pub async fn list_by_video(
    pool: &PgPool,
    video_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<CommentWithContextRow>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {COMMENT_CONTEXT_COLUMNS}
        {COMMENT_CONTEXT_FROM}
        WHERE c.video_id = $1
        ORDER BY c.created_at DESC
        LIMIT $2 OFFSET $3
        "#
    );

    sqlx::query_as::<_, CommentWithContextRow>(&sql)
        .bind(video_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
}

/// Count comments for a video
pub async fn count_by_video(pool: &PgPool, video_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE video_id = $1")
        .bind(video_id)
        .fetch_one(pool)
        .await
}

/// Create a new comment on a video
pub async fn insert_comment(
    pool: &PgPool,
    video_id: Uuid,
    owner_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (video_id, owner_id, content)
        VALUES ($1, $2, $3)
        RETURNING id, video_id, owner_id, content, created_at, updated_at
        "#,
    )
    .bind(video_id)
    .bind(owner_id)
    .bind(content)
    .fetch_one(pool)
    .await
}

/// Get a single comment by ID
pub async fn fetch_comment(
    pool: &PgPool,
    comment_id: Uuid,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, video_id, owner_id, content, created_at, updated_at
        FROM comments
        WHERE id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await
}

/// Get a comment with its owner profile and video summary joined in
pub async fn fetch_with_context(
    pool: &PgPool,
    comment_id: Uuid,
) -> Result<Option<CommentWithContextRow>, sqlx::Error> {
    let sql = format!(
        "SELECT {COMMENT_CONTEXT_COLUMNS} {COMMENT_CONTEXT_FROM} WHERE c.id = $1"
    );

    sqlx::query_as::<_, CommentWithContextRow>(&sql)
        .bind(comment_id)
        .fetch_optional(pool)
        .await
}

pub async fn comment_exists(pool: &PgPool, comment_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM comments WHERE id = $1)")
        .bind(comment_id)
        .fetch_one(pool)
        .await
}

/// Update comment content, returning the number of rows touched
pub async fn update_content(
    pool: &PgPool,
    comment_id: Uuid,
    content: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE comments
        SET content = $1, updated_at = NOW()
        WHERE id = $2
        "#,
    )
    .bind(content)
    .bind(comment_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Delete a comment and the likes referencing it in one transaction.
/// Returns the number of comment rows removed.
pub async fn delete_comment_cascade(
    pool: &PgPool,
    comment_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM likes WHERE comment_id = $1")
        .bind(comment_id)
        .execute(&mut *tx)
        .await?;

    let affected = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok(affected)
}
