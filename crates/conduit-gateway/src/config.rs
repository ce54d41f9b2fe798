use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_ARTICLE_URL: &str = "http://localhost:3001";
pub const DEFAULT_USER_URL: &str = "http://localhost:3002";
pub const DEFAULT_AUTH_URL: &str = "http://localhost:3003";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const ARTICLE_URL_VAR: &str = "ARTICLE_SERVICE_URL";
const USER_URL_VAR: &str = "USER_SERVICE_URL";
const AUTH_URL_VAR: &str = "AUTH_SERVICE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read gateway config '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse gateway config '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Base addresses of the remote services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub article_url: String,
    pub user_url: String,
    pub auth_url: String,
    /// Deadline for any single remote call.
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            article_url: DEFAULT_ARTICLE_URL.to_string(),
            user_url: DEFAULT_USER_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    services: ServicesSection,
}

#[derive(Debug, Default, Deserialize)]
struct ServicesSection {
    article_url: Option<String>,
    user_url: Option<String>,
    auth_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl GatewayConfig {
    /// Defaults, then the optional TOML file, then environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = path {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            config.apply_toml(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        }
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn apply_toml(&mut self, content: &str) -> Result<(), toml::de::Error> {
        let file: FileConfig = toml::from_str(content)?;
        let services = file.services;
        if let Some(url) = services.article_url {
            self.article_url = url;
        }
        if let Some(url) = services.user_url {
            self.user_url = url;
        }
        if let Some(url) = services.auth_url {
            self.auth_url = url;
        }
        if let Some(secs) = services.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        Ok(())
    }

    /// Override service URLs from non-empty variables returned by `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(url) = non_empty(ARTICLE_URL_VAR) {
            self.article_url = url;
        }
        if let Some(url) = non_empty(USER_URL_VAR) {
            self.user_url = url;
        }
        if let Some(url) = non_empty(AUTH_URL_VAR) {
            self.auth_url = url;
        }
    }
}
