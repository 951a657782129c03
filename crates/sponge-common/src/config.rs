//! Client configuration.
//! Defaults, then an optional sponge.toml (or the path in SPONGE_CONFIG),
//! then SPONGE_API_* environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::error::{Result, SpongeError};

pub const DEFAULT_BASE_URL: &str = "https://exbio.wzw.tum.de/sponge-api-v2/";
pub const LATEST_VERSION: u32 = 2;

pub const ENV_CONFIG_PATH: &str = "SPONGE_CONFIG";
pub const ENV_BASE_URL: &str = "SPONGE_API_BASE_URL";
pub const ENV_API_VERSION: &str = "SPONGE_API_VERSION";
pub const ENV_TIMEOUT_SECS: &str = "SPONGE_API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// SPONGEdb version sent as `sponge_db_version` when a query doesn't override it.
    #[serde(default = "default_api_version")]
    pub api_version: u32,
    #[serde(default = "default_headers")]
    pub headers: Vec<(String, String)>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url()     -> String { DEFAULT_BASE_URL.to_string() }
fn default_api_version()  -> u32    { LATEST_VERSION }
fn default_timeout_secs() -> u64    { 30 }

fn default_headers() -> Vec<(String, String)> {
    vec![("Content-Type".to_string(), "application/json".to_string())]
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            headers: default_headers(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Load configuration for the current process.
    /// Reads SPONGE_CONFIG (or ./sponge.toml when present), then applies env overrides.
    pub fn load() -> Result<Self> {
        let explicit = std::env::var(ENV_CONFIG_PATH).ok();
        let path = explicit.clone().unwrap_or_else(|| "sponge.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else if explicit.is_some() {
            return Err(SpongeError::Config(format!("Config file not found: {}", path)));
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ClientConfig = toml::from_str(content)
            .map_err(|e| SpongeError::Config(format!("Invalid TOML: {}", e)))?;
        config.validated()
    }

    /// Apply SPONGE_API_* overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(version) = lookup(ENV_API_VERSION) {
            self.api_version = version.trim().parse().map_err(|_| {
                SpongeError::Config(format!("{} must be an integer, got {:?}", ENV_API_VERSION, version))
            })?;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = secs.trim().parse().map_err(|_| {
                SpongeError::Config(format!("{} must be an integer, got {:?}", ENV_TIMEOUT_SECS, secs))
            })?;
        }
        *self = self.clone().validated()?;
        Ok(())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        self.base_url = base_url.into();
        self.validated()
    }

    pub fn with_api_version(mut self, version: u32) -> Self {
        self.api_version = version;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full URL for an endpoint path relative to the base URL.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Checks the base URL and normalizes it to end with `/`.
    fn validated(mut self) -> Result<Self> {
        let parsed = Url::parse(&self.base_url)
            .map_err(|e| SpongeError::Config(format!("Invalid base URL {:?}: {}", self.base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SpongeError::Config(format!(
                "Base URL must be http(s), got {:?}",
                self.base_url
            )));
        }
        if !self.base_url.ends_with('/') {
            self.base_url.push('/');
        }
        Ok(self)
    }
}
