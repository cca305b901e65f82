use crate::auth::JwtConfig;
use crate::utils::{AppError, ErrorCode};

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | DATABASE_PATH | supper.db | SQLite file |
/// | HTTP_PORT | 3000 | HTTP port |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | fallback when `RUST_LOG` is unset |
/// | LOG_DIR | - | daily rolling log files when set |
/// | JWT_SECRET | random in development | HMAC key, at least 32 chars |
/// | JWT_EXPIRATION_MINUTES | 10080 | token lifetime |
/// | REQUEST_TIMEOUT_MS | 30000 | per-request timeout |
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub jwt: JwtConfig,
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables, with defaults.
    ///
    /// Fails only on an unusable JWT secret.
    pub fn from_env() -> Result<Self, AppError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let jwt = JwtConfig::from_env(environment == "development")
            .map_err(|e| AppError::with_message(ErrorCode::ConfigError, e.to_string()))?;

        Ok(Self {
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "supper.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            jwt,
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
        })
    }
}

/// Fixed configuration for tests (no environment access)
#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        database_path: ":memory:".into(),
        http_port: 0,
        environment: "test".into(),
        log_level: "debug".into(),
        log_dir: None,
        jwt: crate::auth::jwt::test_config(),
        request_timeout_ms: 5000,
    }
}
