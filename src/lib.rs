/// vidstream service library
///
/// Backend for a video-sharing platform: video CRUD with offloaded media
/// assets, comments, likes, and channel subscriptions on top of Postgres.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and the response envelope
/// - `models`: Data structures for videos, comments, likes, subscriptions
/// - `services`: Business logic layer
/// - `db`: Database access layer and repositories
/// - `media`: Media store adapter (upload/delete of binary assets)
/// - `middleware`: JWT authentication and ownership checks
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod media;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
