//! # Forge Client
//!
//! Typed async client for forge-style code hosting REST APIs
//! (GitHub-compatible wire format).
//!
//! This crate provides:
//! - **Repositories**: list, look up, create, and delete repositories
//! - **Git Data**: raw blob, tree, commit, and reference endpoints
//! - **Commit Composition**: [`ForgeClient::commit_files`], the
//!   five-call workflow that turns file contents into a commit on a
//!   branch
//! - **OAuth**: authorization URL building and code-for-token exchange
//!
//! Every operation is a direct mapping from a method call to one
//! documented endpoint; validity of the resulting objects is delegated
//! entirely to the remote service.
//!
//! ## Example
//!
//! ```rust,ignore
//! use forge_client::{Authentication, CommitFile, ForgeClient};
//!
//! let client = ForgeClient::new("https://api.github.com")
//!     .with_auth(Authentication::bearer(token));
//!
//! let commit = client
//!     .commit_files(
//!         "alice",
//!         "widget",
//!         "main",
//!         "add readme",
//!         &[CommitFile::text("README.md", "# widget\n")],
//!         None,
//!     )
//!     .await?;
//! println!("branch now at {}", commit.sha);
//! ```
//!
//! ## Authentication
//!
//! Credentials are attached to every request:
//!
//! ```text
//! # Bearer token (OAuth or personal access token)
//! Authorization: Bearer gho_XXXXX
//!
//! # Basic auth (username:token)
//! Authorization: Basic base64(alice:gho_XXXXX)
//! ```
//!
//! Anonymous clients can read public resources only.

mod auth;
mod client;
mod error;
mod git;
mod oauth;
mod repos;

pub use auth::Authentication;
pub use client::{ClientConfig, ForgeClient, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiResult};
pub use git::{
    BlobEncoding, CommitFile, CommitUser, GitBlob, GitCommit, GitObject, GitReference, GitTree,
    NewBlob, NewCommit, NewTree, NewTreeEntry, ShaPointer, TreeEntry, TreeEntryMode, TreeEntryType,
};
pub use oauth::{AccessToken, OAuthClient, OAuthConfig, DEFAULT_OAUTH_BASE_URL};
pub use repos::{NewRepository, RepoListParams, RepoOwner, Repository, Visibility};
