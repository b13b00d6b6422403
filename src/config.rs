/// Configuration management for the vidstream service
///
/// Configuration is loaded from environment variables, with development
/// defaults for everything except production secrets.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Auth (JWT) configuration
    pub auth: AuthConfig,
    /// Media store configuration
    pub media: MediaStoreConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Auth (JWT) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret used to validate access tokens
    pub jwt_secret: String,
}

/// Media store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaStoreConfig {
    /// Base URL of the media-hosting API
    pub base_url: String,
    /// API key sent with every request
    pub api_key: String,
    /// Upload request timeout in seconds
    pub upload_timeout_secs: u64,
    /// Directory for multipart spool files
    pub tmp_dir: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("VIDSTREAM_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("VIDSTREAM_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if app_env.eq_ignore_ascii_case("production") && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/vidstream".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            auth: {
                let jwt_secret = match std::env::var("JWT_SECRET") {
                    Ok(value) if !value.trim().is_empty() => value,
                    _ if app_env.eq_ignore_ascii_case("production") => {
                        return Err("JWT_SECRET must be set in production".to_string())
                    }
                    _ => "dev-secret-do-not-use".to_string(),
                };

                AuthConfig { jwt_secret }
            },
            media: MediaStoreConfig {
                base_url: std::env::var("MEDIA_STORE_URL")
                    .unwrap_or_else(|_| "http://localhost:9000".to_string()),
                api_key: {
                    let key = std::env::var("MEDIA_STORE_API_KEY").unwrap_or_default();
                    if app_env.eq_ignore_ascii_case("production") && key.trim().is_empty() {
                        return Err("MEDIA_STORE_API_KEY must be set in production".to_string());
                    }
                    key
                },
                upload_timeout_secs: std::env::var("MEDIA_STORE_UPLOAD_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(300),
                tmp_dir: std::env::var("UPLOAD_TMP_DIR")
                    .unwrap_or_else(|_| std::env::temp_dir().display().to_string()),
            },
        })
    }
}
