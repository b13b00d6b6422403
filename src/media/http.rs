/// HTTP client for the media-hosting service
///
/// Uploads go out as multipart form posts; deletes as JSON posts to the
/// destroy endpoint. Timeouts are bounded so a wedged media host cannot
/// hold request handlers forever.
use crate::config::MediaStoreConfig;
use crate::error::{AppError, Result};
use crate::media::{MediaAsset, MediaStore, ResourceKind};
use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Raw upload response from the media host. `url` is optional on the
/// wire; an upload without one is treated as failed.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: Option<String>,
    public_id: Option<String>,
    duration: Option<f64>,
}

pub struct HttpMediaStore {
    client: HttpClient,
    base_url: String,
    api_key: String,
}

impl HttpMediaStore {
    pub fn from_config(cfg: &MediaStoreConfig) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(cfg.upload_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {e}")))?;

        tracing::info!(base_url = %cfg.base_url, "Media store client initialized");

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
        })
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(&self, local_path: &Path, kind: ResourceKind) -> Result<MediaAsset> {
        let file_name = local_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.bin")
            .to_string();

        let bytes = tokio::fs::read(local_path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read upload spool file: {e}")))?;

        let form = multipart::Form::new()
            .text("resource_type", kind.as_str())
            .part("file", multipart::Part::bytes(bytes).file_name(file_name));

        let response = self
            .client
            .post(format!("{}/v1/upload", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::MediaStore(format!("upload request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::MediaStore(format!(
                "upload rejected with status {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::MediaStore(format!("invalid upload response: {e}")))?;

        match (body.url, body.public_id) {
            (Some(url), Some(public_id)) => Ok(MediaAsset {
                url,
                public_id,
                duration: body.duration,
            }),
            _ => Err(AppError::MediaStore(
                "upload response missing url or public_id".to_string(),
            )),
        }
    }

    async fn delete(&self, public_id: &str, kind: ResourceKind) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/v1/destroy", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "public_id": public_id,
                "resource_type": kind.as_str(),
            }))
            .send()
            .await
            .map_err(|e| AppError::MediaStore(format!("delete request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::MediaStore(format!(
                "delete rejected with status {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> MediaStoreConfig {
        MediaStoreConfig {
            base_url: "http://localhost:1/".to_string(),
            api_key: "test".to_string(),
            upload_timeout_secs: 1,
            tmp_dir: std::env::temp_dir().display().to_string(),
        }
    }

    #[test]
    fn base_url_is_normalized() {
        let store = HttpMediaStore::from_config(&test_config()).unwrap();
        assert_eq!(store.base_url, "http://localhost:1");
    }

    #[tokio::test]
    async fn upload_of_missing_spool_file_fails_before_any_request() {
        let store = HttpMediaStore::from_config(&test_config()).unwrap();
        let err = store
            .upload(Path::new("/nonexistent/spool/file.mp4"), ResourceKind::Video)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
