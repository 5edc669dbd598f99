use anyhow::{anyhow, Context, Result};
use desk_core::config::API_URL;
use desk_core::DeskConfigSnapshot;
use reqwest::Url;

/// Transport settings fixed at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
}

impl ClientConfig {
    /// Parse the API base URL. A trailing slash is added so relative paths
    /// join under it (`http://host/api` + `users` → `http://host/api/users`).
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim();
        let normalized = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };
        let base_url =
            Url::parse(&normalized).with_context(|| format!("invalid API base URL: {base_url:?}"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("API base URL cannot be a base: {base_url}"));
        }
        Ok(Self { base_url })
    }

    /// Read `api.url` from the application configuration.
    pub fn from_snapshot(config: &DeskConfigSnapshot) -> Result<Self> {
        let url = config
            .get(API_URL)
            .ok_or_else(|| anyhow!("missing configuration key `{API_URL}`"))?;
        Self::new(url)
    }
}
