//! Stateless GitHub API client for one repository.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::endpoints::ApiEndpoints;
use super::transport::{Transport, TransportError, TransportErrorKind};
use super::types::{BlobResponse, ContentEntry};
use crate::error::{Error, Result};
use crate::retry::{retry_async, RetryPolicy};

const ACCEPT: &str = "application/vnd.github.v3+json";

/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn Transport>,
    endpoints: ApiEndpoints,
    token: Option<String>,
    user_agent: String,
    retry: RetryPolicy,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("endpoints", &self.endpoints)
            .field("authenticated", &self.token.is_some())
            .field("retry", &self.retry)
            .finish()
    }
}

impl GitHubClient {
    pub fn new(transport: Arc<dyn Transport>, endpoints: ApiEndpoints) -> Self {
        Self {
            transport,
            endpoints,
            token: None,
            user_agent: format!("gitlode/{}", env!("CARGO_PKG_VERSION")),
            retry: RetryPolicy::default(),
        }
    }

    /// Blank tokens are treated as absent.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Accept".to_string(), ACCEPT.to_string()),
            ("User-Agent".to_string(), self.user_agent.clone()),
        ];
        if let Some(token) = &self.token {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token.trim())));
        }
        headers
    }

    /// One GET on the blocking pool, without retries. Non-2xx becomes `Error::Fetch`.
    async fn get_once(&self, url: &str) -> Result<Vec<u8>> {
        let transport = Arc::clone(&self.transport);
        let headers = self.headers();
        let owned_url = url.to_string();
        let response = tokio::task::spawn_blocking(move || transport.get(&owned_url, &headers))
            .await
            .map_err(|e| {
                TransportError::new(TransportErrorKind::Other, format!("transport task: {}", e))
            })??;

        if !response.is_success() {
            tracing::debug!(status = response.status, url, "non-success response");
            return Err(Error::Fetch {
                status: response.status,
                url: url.to_string(),
            });
        }
        Ok(response.body)
    }

    /// GET with the client's retry policy.
    pub async fn get(&self, url: &str) -> Result<Vec<u8>> {
        retry_async(&self.retry, url, || self.get_once(url)).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.get(url).await?;
        serde_json::from_slice(&body).map_err(|e| Error::Decode(format!("{}: {}", url, e)))
    }

    /// `Ok(true)` on 2xx, `Ok(false)` on 404, any other failure is an error.
    pub async fn branch_exists(&self, candidate: &str) -> Result<bool> {
        let url = self.endpoints.branch(candidate);
        match self.get(&url).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// One directory listing (not recursive).
    pub async fn list_contents(&self, url: &str) -> Result<Vec<ContentEntry>> {
        self.get_json(url).await
    }

    pub async fn get_blob(&self, sha: &str) -> Result<BlobResponse> {
        let url = self.endpoints.blob(sha);
        self.get_json(&url).await
    }
}
