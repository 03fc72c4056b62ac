//! Deployment configuration for the analysis service client.
//!
//! Resolved once at startup and handed to the client by value; nothing reads
//! process-wide state after that.

use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONFIG_FILE: &str = "clindoc.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            ..Self::default()
        })
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    backend_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Loads configuration from `clindoc.toml` (or `CLINDOC_CONFIG`) and the
/// process environment.
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    load_config_with(|name| std::env::var(name).ok())
}

/// Same as [`load_config`] with an injectable environment lookup.
pub fn load_config_with(
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig, ConfigError> {
    let mut config = ClientConfig::default();

    let file_path = env("CLINDOC_CONFIG");
    let explicit_file = file_path.is_some();
    let file_path = file_path.unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
    if let Some(file_cfg) = read_file_config(Path::new(&file_path), explicit_file)? {
        if let Some(v) = file_cfg.backend_url {
            config.base_url = v;
        }
        if let Some(secs) = file_cfg.request_timeout_secs.filter(|secs| *secs > 0) {
            config.request_timeout = Duration::from_secs(secs);
        }
    }

    if let Some(v) = env("CLINDOC_BACKEND_URL") {
        config.base_url = v;
    }
    if let Some(v) = env("APP__BACKEND_URL") {
        config.base_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
            _ => tracing::warn!(value = %v, "ignoring invalid APP__REQUEST_TIMEOUT_SECS"),
        }
    }

    config.base_url = normalize_base_url(&config.base_url)?;
    Ok(config)
}

fn read_file_config(path: &Path, required: bool) -> Result<Option<FileConfig>, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::ReadFile {
                path: path.display().to_string(),
                source,
            })
        }
    };

    toml::from_str::<FileConfig>(&raw)
        .map(Some)
        .map_err(|source| ConfigError::ParseFile {
            path: path.display().to_string(),
            source,
        })
}

/// Trims whitespace and trailing slashes so endpoint paths can be appended
/// directly. An empty value falls back to [`DEFAULT_BACKEND_URL`].
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(DEFAULT_BACKEND_URL.to_string());
    }

    let parsed = Url::parse(trimmed).map_err(|err| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
