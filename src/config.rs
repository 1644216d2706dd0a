//! Configuration management for gqlpad.
//!
//! Handles loading configuration from TOML files and environment variables.
//! The only section today describes the backend endpoint.

use crate::error::{GqlpadError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Main configuration structure for gqlpad.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend endpoint configuration.
    #[serde(default)]
    pub endpoint: EndpointConfig,
}

/// Where and how queries are sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Backend origin (scheme, host, port).
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Path of the GraphQL handler, resolved against the origin.
    #[serde(default = "default_path")]
    pub path: String,

    /// Request timeout in seconds. Unset means the HTTP client's default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Cookie (`name=value`) seeded into the session jar before the first request.
    #[serde(default)]
    pub session_cookie: Option<String>,
}

fn default_origin() -> String {
    "http://localhost:3001".to_string()
}

fn default_path() -> String {
    "/query".to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            path: default_path(),
            timeout_secs: None,
            session_cookie: None,
        }
    }
}

impl EndpointConfig {
    /// Parses the origin, rejecting anything that is not http(s).
    pub fn origin_url(&self) -> Result<Url> {
        let url = Url::parse(&self.origin)
            .map_err(|e| GqlpadError::config(format!("Invalid endpoint '{}': {e}", self.origin)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(GqlpadError::config(format!(
                "Invalid scheme '{}'. Expected 'http' or 'https'",
                url.scheme()
            )));
        }

        Ok(url)
    }

    /// Returns the full URL queries are posted to.
    ///
    /// The path is resolved like a browser resolves `/query` against the page
    /// origin, so any path already on the origin is replaced.
    pub fn query_url(&self) -> Result<Url> {
        self.origin_url()?
            .join(&self.path)
            .map_err(|e| GqlpadError::config(format!("Invalid query path '{}': {e}", self.path)))
    }

    /// Returns the configured request timeout.
    ///
    /// Zero is rejected: it would make every request time out immediately.
    pub fn timeout(&self) -> Result<Option<Duration>> {
        match self.timeout_secs {
            Some(0) => Err(GqlpadError::config(
                "timeout_secs must be at least 1; leave it unset for no timeout",
            )),
            secs => Ok(secs.map(Duration::from_secs)),
        }
    }

    /// Applies an origin override from the command line or `GQLPAD_ENDPOINT`.
    pub fn apply_origin_override(&mut self, origin: Option<&str>) {
        if let Some(origin) = origin.map(str::trim).filter(|o| !o.is_empty()) {
            self.origin = origin.to_string();
        }
    }

    /// Returns a display string for log lines (never includes the cookie).
    pub fn display_string(&self) -> String {
        match self.query_url() {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", self.origin, self.path),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gqlpad")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| GqlpadError::config(format!("Failed to read config file: {e}")))?;

        let config = Self::parse_toml(&content, path)?;
        config.endpoint.timeout()?;
        Ok(config)
    }

    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            GqlpadError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
