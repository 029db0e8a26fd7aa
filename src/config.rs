//! Host configuration
//!
//! Connection settings for the command-line host, loaded from YAML:
//!
//! ```yaml
//! base_url: https://api.us-2.example.com
//! token: eyJhbGciOi...
//! page_size: 200
//! timeout_secs: 15
//! ```

use crate::error::{Error, Result};
use crate::fetch::{FetchRequest, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT, MAX_PAGE_SIZE};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Settings shared by every page the host requests
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    /// API base URL
    pub base_url: String,

    /// Bearer token; the `--token` flag takes precedence
    #[serde(default)]
    pub token: Option<String>,

    /// Page size (1..=1000)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-call deadline in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl HostConfig {
    /// Create a config with default page size and timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Load and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate config YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::config("base_url cannot be empty"));
        }
        url::Url::parse(self.base_url.trim())?;
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::config(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be positive"));
        }
        Ok(())
    }

    /// Replace the token when `token` is given
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        if token.is_some() {
            self.token = token;
        }
        self
    }

    /// Per-call deadline
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// First-page request for `entity_id` with these settings
    pub fn request(&self, entity_id: impl Into<String>) -> Result<FetchRequest> {
        let token = self
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::config("no bearer token configured (set token or pass --token)"))?;

        Ok(FetchRequest::new(self.base_url.trim(), token, entity_id)
            .with_page_size(self.page_size)
            .with_timeout(self.timeout()))
    }
}

impl std::fmt::Debug for HostConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("page_size", &self.page_size)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
