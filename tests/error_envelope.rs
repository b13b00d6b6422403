use actix_web::body::to_bytes;
use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use vidstream::AppError;

async fn envelope_of(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.error_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body()).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[actix_web::test]
async fn error_envelope_mirrors_http_status() {
    let (status, body) = envelope_of(AppError::NotFound("video gone".to_string())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["message"], "Not found: video gone");
}

#[actix_web::test]
async fn forbidden_and_bad_request_codes() {
    let (status, body) = envelope_of(AppError::Forbidden("not yours".to_string())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["statusCode"], 403);

    let (status, body) = envelope_of(AppError::BadRequest("title is required".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);
}

#[actix_web::test]
async fn internal_errors_do_not_leak_variant_details_shape() {
    let (status, body) = envelope_of(AppError::Database("pool timed out".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["statusCode"], 500);
    assert!(body.get("data").is_none());
}
