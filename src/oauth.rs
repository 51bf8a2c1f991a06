//! # OAuth
//!
//! Web-application OAuth flow: authorization URL building and
//! code-for-token exchange.
//!
//! The OAuth endpoints live on the forge's web host, not the API host,
//! so this module carries its own configuration and client instead of
//! hanging off [`ForgeClient`](crate::ForgeClient).

use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::auth::Authentication;
use crate::error::{ApiError, ApiResult};

/// Default web host carrying the OAuth endpoints.
pub const DEFAULT_OAUTH_BASE_URL: &str = "https://github.com";

/// OAuth application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    /// Base URL of the web host (not the API host).
    pub base_url: String,
    /// The application's client ID.
    pub client_id: String,
    /// The application's client secret.
    pub client_secret: String,
    /// Callback URL registered with the application.
    #[serde(default)]
    pub redirect_uri: Option<String>,
    /// Requested scopes (e.g. `repo`, `user`).
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl OAuthConfig {
    /// Creates a configuration against the default web host.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_OAUTH_BASE_URL.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: None,
            scopes: Vec::new(),
        }
    }

    /// Sets the callback URL.
    #[must_use]
    pub fn redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }

    /// Adds a requested scope.
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scopes.push(scope.into());
        self
    }

    /// Builds the URL a user should be sent to for authorization.
    ///
    /// `GET {base}/login/oauth/authorize`
    ///
    /// Scopes are space-joined into a single `scope` parameter; `state`
    /// is echoed back by the service on the callback.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the configured base URL does not
    /// parse.
    pub fn authorize_url(&self, state: Option<&str>) -> ApiResult<String> {
        let mut url = Url::parse(&format!(
            "{}/login/oauth/authorize",
            self.base_url.trim_end_matches('/')
        ))
        .map_err(|e| ApiError::Config(format!("invalid oauth base url: {e}")))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("client_id", &self.client_id);
            if let Some(redirect_uri) = &self.redirect_uri {
                query.append_pair("redirect_uri", redirect_uri);
            }
            if !self.scopes.is_empty() {
                query.append_pair("scope", &self.scopes.join(" "));
            }
            if let Some(state) = state {
                query.append_pair("state", state);
            }
        }

        Ok(url.into())
    }
}

/// An access token granted by the token exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    /// The token value.
    pub access_token: String,
    /// Token type (the service reports "bearer").
    pub token_type: String,
    /// Comma-separated scopes granted to the token.
    #[serde(default)]
    pub scope: Option<String>,
}

impl AccessToken {
    /// Converts the token into credentials for a
    /// [`ForgeClient`](crate::ForgeClient).
    #[must_use]
    pub fn authentication(&self) -> Authentication {
        Authentication::bearer(&self.access_token)
    }
}

/// Form body for the code-for-token exchange.
#[derive(Debug, Serialize)]
struct TokenExchange<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_uri: Option<&'a str>,
}

/// The token endpoint reports failures inside a 200 body, so both
/// shapes have to be decoded.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TokenExchangeResponse {
    Token(AccessToken),
    Error {
        error: String,
        #[serde(default)]
        error_description: Option<String>,
    },
}

/// Client for the OAuth endpoints.
#[derive(Clone)]
pub struct OAuthClient {
    config: OAuthConfig,
    http: Client,
}

impl OAuthClient {
    /// Creates a client from an explicit configuration.
    pub fn new(config: OAuthConfig) -> Self {
        Self {
            config,
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("failed to create HTTP client"),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Builds the authorization URL; see [`OAuthConfig::authorize_url`].
    pub fn authorize_url(&self, state: Option<&str>) -> ApiResult<String> {
        self.config.authorize_url(state)
    }

    /// Exchanges a callback code for an access token.
    ///
    /// `POST {base}/login/oauth/access_token` with a form-encoded body
    /// and `Accept: application/json`.
    ///
    /// # Errors
    ///
    /// * [`ApiError::Network`](crate::ApiError::Network) - request failed
    /// * [`ApiError::Api`](crate::ApiError::Api) - the service rejected
    ///   the code (including rejections reported inside a 200 body)
    pub async fn exchange_code(&self, code: &str) -> ApiResult<AccessToken> {
        let body = TokenExchange {
            client_id: &self.config.client_id,
            client_secret: &self.config.client_secret,
            code,
            redirect_uri: self.config.redirect_uri.as_deref(),
        };

        let res = self
            .http
            .post(format!(
                "{}/login/oauth/access_token",
                self.config.base_url.trim_end_matches('/')
            ))
            .header(ACCEPT, "application/json")
            .form(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: res.text().await.unwrap_or_default(),
            });
        }

        let response: TokenExchangeResponse = res
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        match response {
            TokenExchangeResponse::Token(token) => Ok(token),
            TokenExchangeResponse::Error {
                error,
                error_description,
            } => Err(ApiError::Api {
                status: status.as_u16(),
                message: error_description.unwrap_or(error),
            }),
        }
    }
}
