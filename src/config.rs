//! Runtime configuration.
//!
//! Values come from the environment first and may be overridden by command
//! line flags in `main`.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_SHARE_BASE_URL: &str = "https://gitlingo.app";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend origin, without a trailing slash
    pub api_base_url: String,
    /// Public origin used when building share links
    pub share_base_url: String,
    pub request_timeout: Duration,
    /// Where exported charts and CSV files are written
    pub export_dir: PathBuf,
    /// Log every request and response body
    pub dev_mode: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = non_empty("GITLINGO_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let share_base_url = non_empty("GITLINGO_SHARE_URL")
            .unwrap_or_else(|| DEFAULT_SHARE_BASE_URL.to_string());
        let dev_mode = non_empty("GITLINGO_DEV")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(cfg!(feature = "dev"));

        Self {
            api_base_url: trim_slash(api_base_url),
            share_base_url: trim_slash(share_base_url),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            export_dir: default_export_dir(),
            dev_mode,
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = trim_slash(url.into());
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
