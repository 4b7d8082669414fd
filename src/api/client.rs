//! Thin HTTP wrapper around the GitLingo backend.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::Config;
use crate::error::ApiError;

/// JSON-over-HTTP client with a hard per-request timeout.
///
/// Non-2xx responses are not treated as errors: the backend puts a typed error
/// body on failures and callers want to read it.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    dev_mode: bool,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration, dev_mode: bool) -> Result<Self, ApiError> {
        let client = Client::builder()
            .pool_max_idle_per_host(5)
            .user_agent(concat!("gitlingo/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            dev_mode,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(
            config.api_base_url.clone(),
            config.request_timeout,
            config.dev_mode,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with the given query pairs and parse the body as JSON,
    /// whatever the status code.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        if self.dev_mode {
            tracing::debug!(%url, ?query, "API request");
        }

        let request = async {
            let response = self.client.get(&url).query(query).send().await?;
            let status = response.status();
            let text = response.text().await?;
            if self.dev_mode {
                tracing::debug!(%url, %status, body = %truncate(&text, 500), "API response");
            }
            Ok::<_, ApiError>(serde_json::from_str::<T>(&text)?)
        };

        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(%url, timeout_secs = self.timeout.as_secs(), "API request timed out");
                Err(ApiError::Timeout(self.timeout.as_secs()))
            }
        }
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
