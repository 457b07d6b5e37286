//! HTTP data source.
//!
//! Fetches collections from a REST API laid out like JSONPlaceholder:
//! `/posts`, `/users`, `/comments` and `/posts/{id}`.

use crate::error::SourceError;
use crate::models::{Comment, Post, User};
use crate::source::DataSource;
use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Connection settings for [`HttpDataSource`].
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Base URL of the API, without a trailing slash.
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://jsonplaceholder.typicode.com".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// REST-backed [`DataSource`].
pub struct HttpDataSource {
    config: SourceConfig,
    http_client: reqwest::Client,
}

impl HttpDataSource {
    /// Build a data source with a shared HTTP client.
    pub fn new(mut config: SourceConfig) -> Result<Self> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("postjoin/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    /// Send a GET request and map transport-level failures.
    async fn send(&self, resource: &str, path: &str) -> Result<reqwest::Response, SourceError> {
        let url = self.url(path);
        debug!("GET {}", url);

        self.http_client.get(&url).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("request timed out after {}s", self.config.timeout_seconds)
            } else if e.is_connect() {
                format!("cannot connect to {}", self.config.base_url)
            } else {
                format!("request failed: {}", e)
            };
            warn!("{} fetch failed: {}", resource, message);
            SourceError::transport(resource, message)
        })
    }

    /// Decode a successful response body, rejecting error statuses.
    async fn decode<T: DeserializeOwned>(
        &self,
        resource: &str,
        response: reqwest::Response,
    ) -> Result<T, SourceError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{} fetch returned {}", resource, status);
            return Err(SourceError::transport(
                resource,
                format!("API error {}: {}", status, body),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            warn!("{} response could not be decoded: {}", resource, e);
            SourceError::transport(resource, format!("invalid response body: {}", e))
        })
    }

    async fn get_collection<T: DeserializeOwned>(
        &self,
        resource: &str,
    ) -> Result<Vec<T>, SourceError> {
        let response = self.send(resource, resource).await?;
        let items: Vec<T> = self.decode(resource, response).await?;
        debug!("Fetched {} {}", items.len(), resource);
        Ok(items)
    }
}

impl DataSource for HttpDataSource {
    async fn get_posts(&self) -> Result<Vec<Post>, SourceError> {
        self.get_collection("posts").await
    }

    async fn get_users(&self) -> Result<Vec<User>, SourceError> {
        self.get_collection("users").await
    }

    async fn get_comments(&self) -> Result<Vec<Comment>, SourceError> {
        self.get_collection("comments").await
    }

    async fn get_post(&self, id: i64) -> Result<Post, SourceError> {
        let response = self.send("post", &format!("posts/{}", id)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Post {} not found", id);
            return Err(SourceError::NotFound { id });
        }

        self.decode("post", response).await
    }
}
