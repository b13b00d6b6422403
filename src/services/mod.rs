/// Business logic layer
///
/// Services validate input, enforce ownership, and orchestrate
/// repositories and the media store. Handlers stay thin on top of them.
pub mod comments;
pub mod likes;
pub mod subscriptions;
pub mod videos;

pub use comments::CommentService;
pub use likes::LikeService;
pub use subscriptions::SubscriptionService;
pub use videos::VideoService;
