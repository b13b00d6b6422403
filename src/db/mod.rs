/// Database access layer
///
/// One repository module per entity. Repositories speak `sqlx::Error`;
/// conversion into `AppError` happens at the service layer.
pub mod comment_repo;
pub mod like_repo;
pub mod schema;
pub mod subscription_repo;
pub mod video_repo;

pub use schema::ensure_schema;
