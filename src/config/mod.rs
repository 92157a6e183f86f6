//! Configuration management

use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;

/// Default Fastly API endpoint
pub const DEFAULT_API_ENDPOINT: &str = "https://api.fastly.com";

/// Environment variable holding the API token
pub const ENV_API_TOKEN: &str = "FASTLY_API_TOKEN";

/// Environment variable overriding the API endpoint
pub const ENV_API_ENDPOINT: &str = "FASTLY_API_ENDPOINT";

/// Environment variable holding the default service ID
pub const ENV_SERVICE_ID: &str = "FASTLY_SERVICE_ID";

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    /// API token sent as `Fastly-Key`
    pub api_token: Option<String>,

    /// Base URL of the Fastly API
    pub api_endpoint: String,

    /// Service ID taken from the environment
    pub service_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: None,
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            service_id: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, with the `--token`
    /// value taking over the API token when one was given.
    ///
    /// A missing token is not an error here; the client refuses to send
    /// requests without one.
    pub fn load(token: Option<String>) -> Self {
        let mut config = Self::load_optional();

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            config.api_token = Some(token);
        }

        config
    }

    /// Load configuration from environment variables only
    pub fn load_optional() -> Self {
        let non_empty = |key: &str| env::var(key).ok().filter(|v| !v.is_empty());

        Self {
            api_token: non_empty(ENV_API_TOKEN),
            api_endpoint: non_empty(ENV_API_ENDPOINT)
                .map(|e| e.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string()),
            service_id: non_empty(ENV_SERVICE_ID),
        }
    }

    /// Get config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Cannot determine config directory"))?
            .join("fastly");

        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
        }

        Ok(dir)
    }

    /// Location of the persisted error log
    pub fn error_log_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("errors.log"))
    }
}
