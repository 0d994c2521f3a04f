use std::time::Duration;

use crate::shared::errors::{AppError, AppResult};

/// Default API endpoint for local development
const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Default per-request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the Health Verify Now API
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix, without a trailing slash
    pub base_url: String,
    /// Timeout applied to every request issued by the client
    pub request_timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from the environment (reads `.env` if present)
    ///
    /// `HEALTH_VERIFY_API_URL` overrides the base URL;
    /// `HEALTH_VERIFY_API_TIMEOUT_SECS` overrides the request timeout.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let base_url =
            std::env::var("HEALTH_VERIFY_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let mut config = Self::new(base_url);

        if let Ok(raw) = std::env::var("HEALTH_VERIFY_API_TIMEOUT_SECS") {
            let secs = raw.parse::<u64>().map_err(|_| {
                AppError::Config(format!(
                    "HEALTH_VERIFY_API_TIMEOUT_SECS must be a positive integer, got '{}'",
                    raw
                ))
            })?;
            if secs == 0 {
                return Err(AppError::Config(
                    "HEALTH_VERIFY_API_TIMEOUT_SECS must be greater than zero".to_string(),
                ));
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
