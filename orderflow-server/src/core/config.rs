use crate::auth::{JwtConfig, JwtError};

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | DATABASE_PATH | orderflow.db | SQLite database file |
/// | HTTP_PORT | 3000 | HTTP port |
/// | ENVIRONMENT | development | development, staging or production |
/// | STATIC_DIR | static | Directory served for non-API paths |
/// | LOG_LEVEL | info | tracing max level |
/// | LOG_DIR | (unset) | Daily rolling log files when the directory exists |
/// | INVITATION_TTL_HOURS | 72 | Invitation lifetime |
/// | MIN_PASSWORD_LEN | 8 | Minimum password length |
/// | JWT_SECRET / JWT_EXPIRATION_MINUTES / JWT_ISSUER / JWT_AUDIENCE | see [`JwtConfig`] | Token settings |
///
/// ```ignore
/// DATABASE_PATH=/data/orderflow.db HTTP_PORT=8080 cargo run -p orderflow-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub http_port: u16,
    pub environment: String,
    pub static_dir: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub invitation_ttl_hours: i64,
    pub min_password_len: usize,
    pub jwt: JwtConfig,
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Fails only when the JWT secret is missing or too short outside development.
    pub fn from_env() -> Result<Self, JwtError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let jwt = JwtConfig::from_env(&environment)?;

        Ok(Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "orderflow.db".into()),
            http_port: env_or("HTTP_PORT", 3000),
            environment,
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            invitation_ttl_hours: env_or("INVITATION_TTL_HOURS", 72),
            min_password_len: env_or("MIN_PASSWORD_LEN", 8),
            jwt,
        })
    }

    /// In-memory database and a fixed secret; used by tests
    pub fn for_tests() -> Self {
        Self {
            database_path: ":memory:".into(),
            http_port: 0,
            environment: "test".into(),
            static_dir: "static".into(),
            log_level: "warn".into(),
            log_dir: None,
            invitation_ttl_hours: 72,
            min_password_len: 8,
            jwt: JwtConfig {
                secret: "orderflow-test-secret-0123456789abcdef".into(),
                expiration_minutes: 60,
                issuer: "orderflow".into(),
                audience: "orderflow-clients".into(),
            },
        }
    }

    /// Invitation lifetime in milliseconds
    pub fn invitation_ttl_millis(&self) -> i64 {
        self.invitation_ttl_hours * 60 * 60 * 1000
    }
}
