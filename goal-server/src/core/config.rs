use chrono_tz::Tz;

use crate::utils::AppResult;
use crate::utils::time::parse_timezone;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | HTTP port |
/// | ENVIRONMENT | development | development, staging or production |
/// | LOG_LEVEL | info | tracing filter |
/// | LOG_DIR | (unset) | daily rolling log files when the directory exists |
/// | BUSINESS_TIMEZONE | Europe/Paris | timezone that decides "today" |
/// | REQUEST_TIMEOUT_MS | 30000 | per-request timeout (ms) |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 BUSINESS_TIMEZONE=America/Montreal cargo run -p goal-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// IANA name, parsed at startup
    pub business_timezone: String,
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load from environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            business_timezone: std::env::var("BUSINESS_TIMEZONE")
                .unwrap_or_else(|_| "Europe/Paris".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
        }
    }

    pub fn timezone(&self) -> AppResult<Tz> {
        parse_timezone(&self.business_timezone)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
