//! # API Client
//!
//! Core client handle and request/response plumbing shared by every
//! resource module.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::auth::Authentication;
use crate::error::{ApiError, ApiResult};

/// Default public API host.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// User agent sent with every request.
const USER_AGENT: &str = concat!("forge-client/", env!("CARGO_PKG_VERSION"));

/// Explicit client configuration.
///
/// Passed to [`ForgeClient::with_config`]; there is no process-global
/// configuration. The default points at the public API host with no
/// credentials.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub base_url: String,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Request timeout applied to every call.
    pub timeout: Duration,
    /// Credentials attached to every request.
    pub auth: Authentication,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            auth: Authentication::Anonymous,
        }
    }
}

/// HTTP client for a forge-style code hosting REST API.
///
/// Each method maps one-to-one onto a documented endpoint: it builds the
/// request, sends it, and decodes the JSON response into a typed value.
/// The client is cheaply cloneable and can be shared across tasks.
///
/// # Examples
///
/// ```rust,ignore
/// use forge_client::{Authentication, ForgeClient};
///
/// let client = ForgeClient::new("https://api.github.com")
///     .with_auth(Authentication::bearer(token));
///
/// let repos = client.list_repositories(Default::default()).await?;
/// println!("{} repositories", repos.len());
/// ```
#[derive(Clone)]
pub struct ForgeClient {
    config: ClientConfig,
    http: Client,
}

impl ForgeClient {
    /// Creates an anonymous client for the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_config(ClientConfig {
            base_url: base_url.into(),
            ..ClientConfig::default()
        })
    }

    /// Creates a client from an explicit configuration.
    pub fn with_config(mut config: ClientConfig) -> Self {
        // Tolerate trailing slashes so path joins stay predictable.
        while config.base_url.ends_with('/') {
            config.base_url.pop();
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .expect("failed to create HTTP client");

        Self { config, http }
    }

    /// Replaces the credentials on this client.
    #[must_use]
    pub fn with_auth(mut self, auth: Authentication) -> Self {
        self.config.auth = auth;
        self
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the configured credentials.
    #[must_use]
    pub fn auth(&self) -> &Authentication {
        &self.config.auth
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.config.auth.apply(self.http.get(self.url(path)))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.config.auth.apply(self.http.post(self.url(path)))
    }

    pub(crate) fn patch(&self, path: &str) -> RequestBuilder {
        self.config.auth.apply(self.http.patch(self.url(path)))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.config.auth.apply(self.http.delete(self.url(path)))
    }

    /// Checks the response status and decodes the JSON body.
    pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Checks the response status, discarding any body.
    pub(crate) async fn expect_success(response: Response) -> ApiResult<()> {
        Self::check_status(response).await.map(|_| ())
    }

    async fn check_status(response: Response) -> ApiResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        Err(ApiError::Api {
            status: response.status().as_u16(),
            message: response.text().await.unwrap_or_default(),
        })
    }
}
