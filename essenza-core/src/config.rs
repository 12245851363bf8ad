//! Client configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// Default base URL of the recipe API.
pub const DEFAULT_API_URL: &str = "http://localhost:4000";

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How long the success banner stays up before the form comes back.
pub const DEFAULT_SUCCESS_RESET_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the recipe API, without trailing slash.
    pub api_url: String,
    pub timeout: Duration,
    pub success_reset: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            success_reset: Duration::from_millis(DEFAULT_SUCCESS_RESET_MS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `ESSENZA_API_URL`: API base URL (default: "http://localhost:4000")
    /// - `ESSENZA_HTTP_TIMEOUT_SECS`: request timeout (default: 30)
    /// - `ESSENZA_SUCCESS_RESET_MS`: success banner duration (default: 5000)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = env::var("ESSENZA_API_URL") {
            config = config.with_api_url(&url)?;
        }

        if let Ok(value) = env::var("ESSENZA_HTTP_TIMEOUT_SECS") {
            let secs = parse_u64("ESSENZA_HTTP_TIMEOUT_SECS", &value)?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Ok(value) = env::var("ESSENZA_SUCCESS_RESET_MS") {
            let ms = parse_u64("ESSENZA_SUCCESS_RESET_MS", &value)?;
            config.success_reset = Duration::from_millis(ms);
        }

        Ok(config)
    }

    /// Override the API base URL. Must be an absolute http(s) URL.
    pub fn with_api_url(mut self, url: &str) -> Result<Self, ConfigError> {
        let parsed = reqwest::Url::parse(url).map_err(|_| ConfigError::InvalidValue {
            var: "ESSENZA_API_URL",
            value: url.to_string(),
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConfigError::InvalidValue {
                var: "ESSENZA_API_URL",
                value: url.to_string(),
            });
        }
        self.api_url = url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_success_reset(mut self, delay: Duration) -> Self {
        self.success_reset = delay;
        self
    }
}

fn parse_u64(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:4000");
        assert_eq!(config.success_reset, Duration::from_secs(5));
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let config = Config::default()
            .with_api_url("http://recipes.test:8080/")
            .unwrap();
        assert_eq!(config.api_url, "http://recipes.test:8080");
    }

    #[test]
    fn test_api_url_rejects_garbage() {
        assert!(Config::default().with_api_url("not a url").is_err());
        assert!(Config::default().with_api_url("ftp://host").is_err());
    }

    #[test]
    fn test_parse_u64_error_names_variable() {
        let err = parse_u64("ESSENZA_HTTP_TIMEOUT_SECS", "soon").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for ESSENZA_HTTP_TIMEOUT_SECS: soon"
        );
    }
}
