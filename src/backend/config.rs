//! Backend endpoint configuration.

use std::env;

pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Chat backend configuration, injected into `HttpBackend` at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Read the base URL from `CHATLINE_BACKEND_URL`, falling back to the
    /// local development default.
    pub fn from_env() -> Self {
        match env::var("CHATLINE_BACKEND_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        Self::new(base_url)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
