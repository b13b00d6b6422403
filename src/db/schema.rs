use sqlx::PgPool;
use tracing::info;

/// Ensure the vidstream tables exist.
///
/// Tables are lazily created at service startup to unblock environments
/// where migrations have not been applied yet (fresh developer machines,
/// CI spins). The partial unique indexes on `likes` are what make the
/// like/subscribe toggles safe under concurrent duplicate requests.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Ensuring vidstream tables exist");

    for stmt in [
        USERS_TABLE,
        VIDEOS_TABLE,
        COMMENTS_TABLE,
        LIKES_TABLE,
        SUBSCRIPTIONS_TABLE,
        VIDEO_LIKE_UNIQUE_INDEX,
        COMMENT_LIKE_UNIQUE_INDEX,
        VIDEOS_OWNER_INDEX,
        COMMENTS_VIDEO_INDEX,
        LIKES_VIDEO_INDEX,
    ] {
        sqlx::query(stmt).execute(pool).await?;
    }

    Ok(())
}

// The users table is owned by the identity service; this minimal shape
// exists so the service boots standalone.
const USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    username TEXT NOT NULL UNIQUE,
    full_name TEXT NOT NULL DEFAULT '',
    avatar_url TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const VIDEOS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS videos (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    owner_id UUID NOT NULL REFERENCES users(id),
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    video_url TEXT NOT NULL,
    video_public_id TEXT NOT NULL,
    thumbnail_url TEXT NOT NULL,
    thumbnail_public_id TEXT NOT NULL,
    duration DOUBLE PRECISION NOT NULL DEFAULT 0,
    views BIGINT NOT NULL DEFAULT 0,
    published BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const COMMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS comments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    video_id UUID NOT NULL REFERENCES videos(id),
    owner_id UUID NOT NULL REFERENCES users(id),
    content TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

// video_id is always set: for comment likes it denormalizes the owning
// video so video-scoped cleanup needs no join through comments.
const LIKES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS likes (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id),
    video_id UUID NOT NULL REFERENCES videos(id),
    comment_id UUID REFERENCES comments(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const SUBSCRIPTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS subscriptions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    subscriber_id UUID NOT NULL REFERENCES users(id),
    channel_id UUID NOT NULL REFERENCES users(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (subscriber_id, channel_id),
    CHECK (subscriber_id <> channel_id)
)
"#;

const VIDEO_LIKE_UNIQUE_INDEX: &str = r#"
CREATE UNIQUE INDEX IF NOT EXISTS likes_user_video_unique
ON likes (user_id, video_id) WHERE comment_id IS NULL
"#;

const COMMENT_LIKE_UNIQUE_INDEX: &str = r#"
CREATE UNIQUE INDEX IF NOT EXISTS likes_user_comment_unique
ON likes (user_id, comment_id) WHERE comment_id IS NOT NULL
"#;

const VIDEOS_OWNER_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS videos_owner_created_idx
ON videos (owner_id, created_at DESC)
"#;

const COMMENTS_VIDEO_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS comments_video_created_idx
ON comments (video_id, created_at DESC)
"#;

const LIKES_VIDEO_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS likes_video_idx
ON likes (video_id)
"#;
