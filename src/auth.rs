//! # Authentication
//!
//! Credential types attached to every API request.

use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};

/// How requests to the API are authenticated.
///
/// Credentials are plain data and can be persisted alongside other
/// configuration. The variants map directly to the `Authorization`
/// header forms the service accepts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "scheme")]
pub enum Authentication {
    /// No credentials; only public resources are reachable.
    #[default]
    Anonymous,

    /// HTTP Basic authentication with a username and a password or
    /// personal access token.
    Basic {
        /// The account username.
        username: String,
        /// Password or personal access token.
        password: String,
    },

    /// Bearer token authentication (OAuth or personal access token).
    Bearer {
        /// The token value.
        token: String,
    },
}

impl Authentication {
    /// Creates basic credentials.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates bearer credentials.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Returns true if any credentials are configured.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }

    /// Attaches the credentials to an outgoing request.
    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Anonymous => request,
            Self::Basic { username, password } => request.basic_auth(username, Some(password)),
            Self::Bearer { token } => request.bearer_auth(token),
        }
    }
}
