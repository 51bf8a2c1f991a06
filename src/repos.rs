//! # Repositories
//!
//! Repository listing, lookup, creation, and deletion.

use serde::{Deserialize, Serialize};

use crate::client::ForgeClient;
use crate::error::ApiResult;

/// A repository owner as embedded in repository payloads.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoOwner {
    /// Owner ID.
    pub id: u64,
    /// Owner login name.
    pub login: String,
}

/// A repository resource.
///
/// Fields the service may omit are defaulted so older or minimal
/// deployments still decode.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// Repository ID.
    pub id: u64,
    /// The repository name.
    pub name: String,
    /// Full name in `owner/name` form.
    pub full_name: String,
    /// The repository owner.
    pub owner: RepoOwner,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the repository is private.
    #[serde(default)]
    pub private: bool,
    /// Whether the repository is a fork.
    #[serde(default)]
    pub fork: bool,
    /// Default branch name (defaults to "main").
    #[serde(default = "default_branch")]
    pub default_branch: String,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp (ISO 8601).
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_branch() -> String {
    "main".to_string()
}

/// Request body for creating a repository.
#[derive(Debug, Clone, Serialize)]
pub struct NewRepository {
    /// The repository name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the repository is private.
    pub private: bool,
    /// Whether to create an initial commit with an empty README.
    pub auto_init: bool,
}

impl NewRepository {
    /// Creates a request for a public repository with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            private: false,
            auto_init: false,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the repository private.
    #[must_use]
    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }

    /// Requests an initial commit with an empty README.
    #[must_use]
    pub fn auto_init(mut self) -> Self {
        self.auto_init = true;
        self
    }
}

/// Which repositories a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// All repositories visible to the caller.
    All,
    /// Public repositories only.
    Public,
    /// Private repositories only.
    Private,
}

/// Query parameters for [`ForgeClient::list_repositories`].
///
/// `None` fields are omitted from the query string.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepoListParams {
    /// Filter by visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// Filter by affiliation (e.g. "owner", "collaborator").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    /// Sort key (e.g. "created", "updated", "full_name").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Page number (1-based).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl ForgeClient {
    /// Lists repositories of the authenticated user.
    ///
    /// `GET /user/repos`
    ///
    /// # Errors
    ///
    /// * [`ApiError::Network`](crate::ApiError::Network) - request failed
    /// * [`ApiError::Api`](crate::ApiError::Api) - unauthenticated (401)
    pub async fn list_repositories(&self, params: RepoListParams) -> ApiResult<Vec<Repository>> {
        let res = self.get("user/repos").query(&params).send().await?;
        Self::decode(res).await
    }

    /// Retrieves a single repository by owner and name.
    ///
    /// `GET /repos/{owner}/{repo}`
    ///
    /// # Errors
    ///
    /// * [`ApiError::Api`](crate::ApiError::Api) - repository not found (404)
    pub async fn get_repository(&self, owner: &str, repo: &str) -> ApiResult<Repository> {
        let res = self.get(&format!("repos/{owner}/{repo}")).send().await?;
        Self::decode(res).await
    }

    /// Creates a repository for the authenticated user.
    ///
    /// `POST /user/repos`
    ///
    /// # Errors
    ///
    /// * [`ApiError::Api`](crate::ApiError::Api) - name taken (422)
    pub async fn create_repository(&self, new_repo: &NewRepository) -> ApiResult<Repository> {
        let res = self.post("user/repos").json(new_repo).send().await?;
        Self::decode(res).await
    }

    /// Deletes a repository.
    ///
    /// `DELETE /repos/{owner}/{repo}`
    ///
    /// # Errors
    ///
    /// * [`ApiError::Api`](crate::ApiError::Api) - not found (404) or
    ///   insufficient permissions (403)
    pub async fn delete_repository(&self, owner: &str, repo: &str) -> ApiResult<()> {
        let res = self.delete(&format!("repos/{owner}/{repo}")).send().await?;
        Self::expect_success(res).await
    }
}
