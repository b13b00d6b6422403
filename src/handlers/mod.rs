/// HTTP request handlers and the response envelope
///
/// Successful responses are wrapped in `{statusCode, data, message}`;
/// errors are shaped by `AppError::error_response`.
pub mod comments;
pub mod likes;
pub mod subscriptions;
pub mod videos;

use crate::error::AppError;
use actix_web::{web, HttpResponse};
use serde::Serialize;

/// Uniform success envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub data: T,
    pub message: String,
}

pub fn ok<T: Serialize>(data: T, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse {
        status_code: 200,
        data,
        message: message.into(),
    })
}

pub fn created<T: Serialize>(data: T, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Created().json(ApiResponse {
        status_code: 201,
        data,
        message: message.into(),
    })
}

/// Path extractor failures (a malformed uuid in `/videos/{id}` and the
/// like) answer 400 in the standard error envelope instead of the
/// default 404.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(format!("invalid path parameter: {}", err)).into())
}

/// Register all authenticated API routes under the caller's scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/videos")
            .route(web::get().to(videos::list_videos))
            .route(web::post().to(videos::create_video)),
    )
    .service(
        web::resource("/videos/{id}")
            .route(web::get().to(videos::get_video))
            .route(web::patch().to(videos::update_video))
            .route(web::delete().to(videos::delete_video)),
    )
    .service(web::resource("/videos/{id}/publish").route(web::post().to(videos::toggle_publish)))
    .service(
        web::resource("/videos/{id}/comments")
            .route(web::get().to(comments::list_comments))
            .route(web::post().to(comments::create_comment)),
    )
    .service(
        web::resource("/comments/{id}")
            .route(web::patch().to(comments::update_comment))
            .route(web::delete().to(comments::delete_comment)),
    )
    .service(web::resource("/videos/{id}/like").route(web::post().to(likes::toggle_video_like)))
    .service(web::resource("/comments/{id}/like").route(web::post().to(likes::toggle_comment_like)))
    .service(web::resource("/likes/videos").route(web::get().to(likes::list_liked_videos)))
    .service(
        web::resource("/channels/{id}/subscribe")
            .route(web::post().to(subscriptions::toggle_subscription)),
    )
    .service(
        web::resource("/channels/{id}/subscribers")
            .route(web::get().to(subscriptions::list_subscribers)),
    )
    .service(
        web::resource("/users/{id}/subscriptions")
            .route(web::get().to(subscriptions::list_subscribed_channels)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_uses_camel_case_status_code() {
        let envelope = ApiResponse {
            status_code: 200,
            data: serde_json::json!({"ok": true}),
            message: "fetched".to_string(),
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["data"]["ok"], true);
        assert_eq!(value["message"], "fetched");
    }
}
