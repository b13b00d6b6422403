/// Media store adapter
///
/// Binary assets (video files, thumbnails) live on a third-party media
/// host. The service only keeps the returned URL plus an opaque public id
/// used for later deletion.
pub mod http;

pub use http::HttpMediaStore;

use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

/// Resource kind hint passed to the media host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Video,
    Image,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Video => "video",
            ResourceKind::Image => "image",
        }
    }
}

/// A successfully uploaded asset
#[derive(Debug, Clone, Deserialize)]
pub struct MediaAsset {
    pub url: String,
    pub public_id: String,
    pub duration: Option<f64>,
}

/// Upload/delete operations against the media host.
///
/// Upload failures abort the calling request before anything is
/// persisted; deletes are best-effort in the update/delete flows and the
/// caller decides whether to propagate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, local_path: &Path, kind: ResourceKind) -> Result<MediaAsset>;

    async fn delete(&self, public_id: &str, kind: ResourceKind) -> Result<()>;
}
