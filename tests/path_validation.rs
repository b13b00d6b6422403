use actix_web::{test, web, App, HttpResponse};
use uuid::Uuid;
use vidstream::handlers;

async fn echo_id(id: web::Path<Uuid>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "id": *id }))
}

#[actix_web::test]
async fn malformed_uuid_in_path_is_bad_request_with_envelope() {
    let app = test::init_service(
        App::new()
            .app_data(handlers::path_config())
            .route("/videos/{id}", web::get().to(echo_id)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/videos/not-a-uuid")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["statusCode"], 400);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("invalid path parameter"));
}

#[actix_web::test]
async fn well_formed_uuid_still_reaches_the_handler() {
    let app = test::init_service(
        App::new()
            .app_data(handlers::path_config())
            .route("/videos/{id}", web::get().to(echo_id)),
    )
    .await;

    let id = Uuid::new_v4();
    let req = test::TestRequest::get()
        .uri(&format!("/videos/{}", id))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), actix_web::http::StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["id"], id.to_string());
}
