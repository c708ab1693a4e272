use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

use crate::error::{ClientError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_SESSION_FILE: &str = ".alumni-session.json";

/// Client configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub session_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            session_path: PathBuf::from(DEFAULT_SESSION_FILE),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let base_url = env::var("ALUMNI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let session_path = env::var("ALUMNI_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE));

        Self::default()
            .with_base_url(base_url)
            .map(|config| config.with_session_path(session_path))
    }

    /// Override the API base URL. Must be an absolute http(s) URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Result<Self> {
        self.base_url = normalize_base_url(&url.into())?;
        Ok(self)
    }

    pub fn with_session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = path.into();
        self
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ClientError::Config(format!(
            "API URL must start with http:// or https://, got {:?}",
            raw
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ClientConfig::default()
            .with_base_url("https://api.example.org/")
            .unwrap();
        assert_eq!(config.base_url, "https://api.example.org");
    }

    #[test]
    fn test_rejects_non_http_url() {
        let err = ClientConfig::default().with_base_url("ftp://example.org").unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.session_path, PathBuf::from(DEFAULT_SESSION_FILE));
    }
}
