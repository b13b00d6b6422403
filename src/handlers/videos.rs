/// Video handlers - HTTP endpoints for video operations
///
/// Create/update accept multipart form data; file parts are spooled to
/// the configured tmp directory, handed to the media store, and removed
/// afterwards.
use crate::config::Config;
use crate::db::video_repo::{SortDirection, SortKey, VideoListQuery};
use crate::error::{AppError, Result};
use crate::media::MediaStore;
use crate::middleware::UserId;
use crate::services::videos::VideoUpdateInput;
use crate::services::VideoService;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use sqlx::PgPool;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::{created, ok};

#[derive(Debug, serde::Deserialize)]
pub struct VideoListParams {
    pub query: Option<String>,
    pub owner_id: Option<Uuid>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Text fields and spooled file parts of a multipart request
struct UploadForm {
    fields: HashMap<String, String>,
    files: HashMap<String, PathBuf>,
}

impl UploadForm {
    fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn file(&self, name: &str) -> Option<&PathBuf> {
        self.files.get(name)
    }
}

/// Spool a multipart payload: text parts into memory, file parts onto
/// disk under `tmp_dir` with randomized names.
async fn read_form(mut payload: Multipart, tmp_dir: &Path) -> Result<UploadForm> {
    let mut form = UploadForm {
        fields: HashMap::new(),
        files: HashMap::new(),
    };

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?;

        // Parts without a content disposition carry no usable name; skip
        // them and let the stream drain.
        let cd = match field.content_disposition() {
            Some(cd) => cd,
            None => continue,
        };
        let name = match cd.get_name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        let filename = cd.get_filename().map(|f| f.to_string());

        match filename {
            Some(filename) => {
                let ext = filename.rsplit('.').next().unwrap_or("bin").to_lowercase();
                let spool_path = tmp_dir.join(format!("{}.{}", Uuid::new_v4(), ext));
                let mut file = tokio::fs::File::create(&spool_path).await?;

                while let Some(chunk) = field.next().await {
                    let chunk = chunk
                        .map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?;
                    file.write_all(&chunk).await?;
                }
                file.flush().await?;

                form.files.insert(name, spool_path);
            }
            None => {
                let mut value = Vec::new();
                while let Some(chunk) = field.next().await {
                    let chunk = chunk
                        .map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?;
                    value.extend_from_slice(&chunk);
                }
                let value = String::from_utf8(value)
                    .map_err(|_| AppError::BadRequest(format!("field '{}' is not UTF-8", name)))?;
                form.fields.insert(name, value);
            }
        }
    }

    Ok(form)
}

/// Remove spool files, ignoring failures (the tmp dir is periodically
/// cleaned anyway).
async fn cleanup_spool(form: &UploadForm) {
    for path in form.files.values() {
        let _ = tokio::fs::remove_file(path).await;
    }
}

/// List videos with filters, sorting, and pagination
pub async fn list_videos(
    pool: web::Data<PgPool>,
    media: web::Data<Arc<dyn MediaStore>>,
    user_id: UserId,
    params: web::Query<VideoListParams>,
) -> Result<HttpResponse> {
    let sort_key = match &params.sort_by {
        Some(raw) => SortKey::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("unknown sort field '{}'", raw)))?,
        None => SortKey::CreatedAt,
    };
    let sort_dir = match &params.sort_dir {
        Some(raw) => SortDirection::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("unknown sort direction '{}'", raw)))?,
        None => SortDirection::Desc,
    };

    let query = VideoListQuery::new(
        params.query.clone(),
        params.owner_id,
        sort_key,
        sort_dir,
        params.page.unwrap_or(1),
        params.limit.unwrap_or(10),
        Some(user_id.0),
    );

    let service = VideoService::new((**pool).clone(), (**media).clone());
    let videos = service.list_videos(&query).await?;

    Ok(ok(videos, "videos fetched"))
}

/// Fetch a video by id; counts the view
pub async fn get_video(
    pool: web::Data<PgPool>,
    media: web::Data<Arc<dyn MediaStore>>,
    video_id: web::Path<Uuid>,
    _user_id: UserId,
) -> Result<HttpResponse> {
    let service = VideoService::new((**pool).clone(), (**media).clone());
    let video = service.get_video(*video_id).await?;

    Ok(ok(video, "video fetched"))
}

/// Create a video from a multipart form: title, description, a `video`
/// file part, and a `thumbnail` file part.
pub async fn create_video(
    pool: web::Data<PgPool>,
    media: web::Data<Arc<dyn MediaStore>>,
    config: web::Data<Config>,
    user_id: UserId,
    payload: Multipart,
) -> Result<HttpResponse> {
    let form = read_form(payload, Path::new(&config.media.tmp_dir)).await?;

    let result = async {
        let title = form
            .text("title")
            .ok_or_else(|| AppError::BadRequest("title is required".to_string()))?;
        let description = form
            .text("description")
            .ok_or_else(|| AppError::BadRequest("description is required".to_string()))?;
        let video_file = form
            .file("video")
            .ok_or_else(|| AppError::BadRequest("a video file is required".to_string()))?;
        let thumbnail_file = form
            .file("thumbnail")
            .ok_or_else(|| AppError::BadRequest("a thumbnail file is required".to_string()))?;

        let service = VideoService::new((**pool).clone(), (**media).clone());
        service
            .create_video(user_id.0, title, description, video_file, thumbnail_file)
            .await
    }
    .await;

    cleanup_spool(&form).await;

    Ok(created(result?, "video published"))
}

/// Update fields and/or replace assets of an owned video
pub async fn update_video(
    pool: web::Data<PgPool>,
    media: web::Data<Arc<dyn MediaStore>>,
    config: web::Data<Config>,
    video_id: web::Path<Uuid>,
    user_id: UserId,
    payload: Multipart,
) -> Result<HttpResponse> {
    let form = read_form(payload, Path::new(&config.media.tmp_dir)).await?;

    let input = VideoUpdateInput {
        title: form.text("title").map(str::to_string),
        description: form.text("description").map(str::to_string),
        video_file: form.file("video").cloned(),
        thumbnail_file: form.file("thumbnail").cloned(),
    };

    let service = VideoService::new((**pool).clone(), (**media).clone());
    let result = service.update_video(user_id.0, *video_id, input).await;

    cleanup_spool(&form).await;

    Ok(ok(result?, "video updated"))
}

/// Delete an owned video and everything hanging off it
pub async fn delete_video(
    pool: web::Data<PgPool>,
    media: web::Data<Arc<dyn MediaStore>>,
    video_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = VideoService::new((**pool).clone(), (**media).clone());
    service.delete_video(user_id.0, *video_id).await?;

    Ok(ok(serde_json::json!({ "deleted": true }), "video deleted"))
}

/// Flip the published flag of an owned video
pub async fn toggle_publish(
    pool: web::Data<PgPool>,
    media: web::Data<Arc<dyn MediaStore>>,
    video_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = VideoService::new((**pool).clone(), (**media).clone());
    let published = service.toggle_publish(user_id.0, *video_id).await?;

    Ok(ok(
        serde_json::json!({ "published": published }),
        "publish state toggled",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cleanup_spool_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spool.bin");
        tokio::fs::write(&path, b"data").await.unwrap();

        let mut files = HashMap::new();
        files.insert("video".to_string(), path.clone());
        let form = UploadForm {
            fields: HashMap::new(),
            files,
        };

        cleanup_spool(&form).await;
        assert!(!path.exists());
    }

    #[actix_web::test]
    async fn read_form_spools_text_and_file_parts() {
        use actix_web::http::header::{self, HeaderMap};

        let dir = tempfile::tempdir().unwrap();

        let body = concat!(
            "--boundary\r\n",
            "Content-Disposition: form-data; name=\"title\"\r\n\r\n",
            "My video\r\n",
            "--boundary\r\n",
            "Content-Disposition: form-data; name=\"video\"; filename=\"clip.mp4\"\r\n",
            "Content-Type: video/mp4\r\n\r\n",
            "fake-bytes\r\n",
            "--boundary--\r\n",
        );

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("multipart/form-data; boundary=boundary"),
        );
        let stream = futures_util::stream::once(async {
            Ok::<_, actix_web::error::PayloadError>(web::Bytes::from_static(body.as_bytes()))
        });
        let payload = Multipart::new(&headers, stream);

        let form = read_form(payload, dir.path()).await.unwrap();

        assert_eq!(form.text("title"), Some("My video"));
        let spooled = form.file("video").expect("video part spooled to disk");
        assert_eq!(spooled.extension().and_then(|e| e.to_str()), Some("mp4"));
        assert_eq!(tokio::fs::read(spooled).await.unwrap(), b"fake-bytes");

        cleanup_spool(&form).await;
        assert!(!spooled.exists());
    }

    #[test]
    fn upload_form_accessors() {
        let mut fields = HashMap::new();
        fields.insert("title".to_string(), "My video".to_string());
        let form = UploadForm {
            fields,
            files: HashMap::new(),
        };

        assert_eq!(form.text("title"), Some("My video"));
        assert_eq!(form.text("description"), None);
        assert!(form.file("video").is_none());
    }
}
