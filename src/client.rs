// src/client.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::config::ClientConfig;

pub const DOCKERHUB_URL: &str = "https://hub.docker.com";
pub const DOCKERHUB_API_URL: &str = "https://hub.docker.com/v2";

const RESOURCE_REPOSITORIES: &str = "repositories";

/// Join URI segments with single slashes, tolerating stray ones on either side.
pub fn urijoin(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// One operation: fetch the raw repository document as text.
/// The connector is generic over this seam so tests can substitute stubs.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    async fn repository(&self, owner: &str, repository: &str) -> Result<String>;
}

/// Client for the Docker Hub REST API v2.
pub struct DockerHubClient {
    http: reqwest::Client,
    base_url: String,
}

impl DockerHubClient {
    pub fn new() -> Self {
        Self::with_base_url(DOCKERHUB_API_URL)
    }

    /// Point the client at a different API root (tests, mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(cfg: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("building http client")?;
        Ok(Self {
            http,
            base_url: cfg.api_url.clone(),
        })
    }
}

impl Default for DockerHubClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistryClient for DockerHubClient {
    async fn repository(&self, owner: &str, repository: &str) -> Result<String> {
        let url = urijoin(&[self.base_url.as_str(), RESOURCE_REPOSITORIES, owner, repository]);

        tracing::debug!(%url, "docker hub client request");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?
            .error_for_status()
            .with_context(|| format!("requesting {url}"))?;

        resp.text().await.context("reading repository body")
    }
}
