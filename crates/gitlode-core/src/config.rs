use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per API call (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.5 = 500ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.5,
            max_delay_secs: 10,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::from_secs_f64(self.base_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(self.max_delay_secs),
        }
    }
}

/// Global configuration loaded from `~/.config/gitlode/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitlodeConfig {
    /// Base URL of the GitHub REST API.
    pub api_base_url: String,
    /// Host accepted in repository URLs.
    pub web_host: String,
    /// Maximum blob fetches in flight at once. `None` = no limit.
    #[serde(default)]
    pub max_concurrent_fetches: Option<usize>,
    /// Connect timeout per API call, in seconds.
    pub connect_timeout_secs: u64,
    /// Total timeout per API call, in seconds.
    pub request_timeout_secs: u64,
    /// `User-Agent` header sent with every request (GitHub rejects requests without one).
    pub user_agent: String,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for GitlodeConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            web_host: "github.com".to_string(),
            max_concurrent_fetches: Some(8),
            connect_timeout_secs: 15,
            request_timeout_secs: 60,
            user_agent: format!("gitlode/{}", env!("CARGO_PKG_VERSION")),
            retry: None,
        }
    }
}

impl GitlodeConfig {
    /// Retry policy from the `[retry]` section, or the built-in default.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().to_policy()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("gitlode")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GitlodeConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = GitlodeConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: GitlodeConfig = toml::from_str(&data)?;
    Ok(cfg)
}
