use actix_web::{test, web, App, HttpResponse};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;
use vidstream::config::{
    AppConfig, AuthConfig, Config, CorsConfig, DatabaseConfig, MediaStoreConfig,
};
use vidstream::middleware::{Claims, JwtAuthMiddleware, UserId};

fn test_config(secret: &str) -> Config {
    Config {
        app: AppConfig {
            env: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        cors: CorsConfig {
            allowed_origins: "http://localhost:3000".to_string(),
        },
        database: DatabaseConfig {
            url: "postgresql://localhost/unused".to_string(),
            max_connections: 1,
        },
        auth: AuthConfig {
            jwt_secret: secret.to_string(),
        },
        media: MediaStoreConfig {
            base_url: "http://localhost:1".to_string(),
            api_key: "unused".to_string(),
            upload_timeout_secs: 1,
            tmp_dir: std::env::temp_dir().display().to_string(),
        },
    }
}

fn bearer_token(user_id: Uuid, secret: &str) -> String {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

async fn whoami(user_id: UserId) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "id": user_id.0 }))
}

#[actix_web::test]
async fn valid_bearer_token_reaches_handler() {
    let user_id = Uuid::new_v4();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_config("secret-a")))
            .service(
                web::scope("/api/v1")
                    .wrap(JwtAuthMiddleware)
                    .route("/whoami", web::get().to(whoami)),
            ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/whoami")
        .insert_header((
            "Authorization",
            format!("Bearer {}", bearer_token(user_id, "secret-a")),
        ))
        .to_request();

    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["id"], user_id.to_string());
}

#[actix_web::test]
async fn missing_authorization_header_is_rejected() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_config("secret-a")))
            .service(
                web::scope("/api/v1")
                    .wrap(JwtAuthMiddleware)
                    .route("/whoami", web::get().to(whoami)),
            ),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/whoami").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["statusCode"], 401);
    assert_eq!(
        body["message"],
        "Unauthorized: Missing Authorization header"
    );
}

#[actix_web::test]
async fn token_signed_with_wrong_secret_is_rejected() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_config("secret-a")))
            .service(
                web::scope("/api/v1")
                    .wrap(JwtAuthMiddleware)
                    .route("/whoami", web::get().to(whoami)),
            ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/whoami")
        .insert_header((
            "Authorization",
            format!("Bearer {}", bearer_token(Uuid::new_v4(), "secret-b")),
        ))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["statusCode"], 401);
    assert_eq!(body["message"], "Unauthorized: Invalid or expired token");
}

#[actix_web::test]
async fn non_bearer_scheme_is_rejected() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_config("secret-a")))
            .service(
                web::scope("/api/v1")
                    .wrap(JwtAuthMiddleware)
                    .route("/whoami", web::get().to(whoami)),
            ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/whoami")
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}
