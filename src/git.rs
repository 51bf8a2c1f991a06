//! # Git Objects
//!
//! Raw git object endpoints (blobs, trees, commits, references) and the
//! commit-composition workflow built on top of them.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use crate::client::ForgeClient;
use crate::error::{ApiError, ApiResult};

/// Content encoding for blob uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlobEncoding {
    /// Plain UTF-8 text.
    #[serde(rename = "utf-8")]
    Utf8,
    /// Base64-encoded binary content.
    #[serde(rename = "base64")]
    Base64,
}

/// Request body for creating a blob.
#[derive(Debug, Clone, Serialize)]
pub struct NewBlob {
    /// The blob content, encoded per `encoding`.
    pub content: String,
    /// How `content` is encoded.
    pub encoding: BlobEncoding,
}

impl NewBlob {
    /// Creates a blob upload from UTF-8 text.
    pub fn utf8(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            encoding: BlobEncoding::Utf8,
        }
    }

    /// Creates a blob upload from raw bytes, base64-encoding them.
    pub fn base64(content: impl AsRef<[u8]>) -> Self {
        Self {
            content: BASE64.encode(content),
            encoding: BlobEncoding::Base64,
        }
    }
}

/// A bare object pointer: the sha plus its API URL.
///
/// Returned when creating a blob, and embedded in commits as the tree
/// pointer and parent list.
#[derive(Debug, Clone, Deserialize)]
pub struct ShaPointer {
    /// Object SHA.
    pub sha: String,
    /// API URL for the object.
    #[serde(default)]
    pub url: Option<String>,
}

/// A blob as returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct GitBlob {
    /// Blob SHA.
    pub sha: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// Blob content, encoded per `encoding`.
    pub content: String,
    /// Content encoding (the service reports "base64").
    pub encoding: String,
}

impl GitBlob {
    /// Decodes the blob content to raw bytes.
    ///
    /// The service wraps base64 payloads across lines; embedded
    /// whitespace is stripped before decoding.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidResponse`] if the payload is not valid
    /// for the declared encoding.
    pub fn decode(&self) -> ApiResult<Vec<u8>> {
        if self.encoding != "base64" {
            return Ok(self.content.clone().into_bytes());
        }
        let compact: String = self.content.split_whitespace().collect();
        BASE64
            .decode(compact)
            .map_err(|e| ApiError::InvalidResponse(format!("invalid base64 blob content: {e}")))
    }
}

/// File mode of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeEntryMode {
    /// Regular file.
    #[serde(rename = "100644")]
    File,
    /// Executable file.
    #[serde(rename = "100755")]
    Executable,
    /// Subdirectory (tree).
    #[serde(rename = "040000")]
    Subdirectory,
    /// Submodule (commit).
    #[serde(rename = "160000")]
    Submodule,
    /// Symbolic link.
    #[serde(rename = "120000")]
    Symlink,
}

/// Object type of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeEntryType {
    /// File content.
    Blob,
    /// Nested directory.
    Tree,
    /// Submodule commit.
    Commit,
}

/// A tree entry as returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    /// Path relative to the tree root.
    pub path: String,
    /// File mode.
    pub mode: TreeEntryMode,
    /// Entry object type.
    #[serde(rename = "type")]
    pub entry_type: TreeEntryType,
    /// Object SHA.
    pub sha: String,
    /// Size in bytes (blobs only).
    #[serde(default)]
    pub size: Option<u64>,
}

/// A tree entry for tree creation.
#[derive(Debug, Clone, Serialize)]
pub struct NewTreeEntry {
    /// Path relative to the tree root.
    pub path: String,
    /// File mode.
    pub mode: TreeEntryMode,
    /// Entry object type.
    #[serde(rename = "type")]
    pub entry_type: TreeEntryType,
    /// SHA of an existing object.
    pub sha: String,
}

impl NewTreeEntry {
    /// Creates a blob entry pointing at an uploaded blob.
    pub fn blob(path: impl Into<String>, mode: TreeEntryMode, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode,
            entry_type: TreeEntryType::Blob,
            sha: sha.into(),
        }
    }
}

/// Request body for creating a tree.
#[derive(Debug, Clone, Serialize)]
pub struct NewTree {
    /// Existing tree (or commit resolved to its tree) to layer the new
    /// entries on top of. Without it the tree contains only `tree`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_tree: Option<String>,
    /// The entries of the new tree.
    pub tree: Vec<NewTreeEntry>,
}

/// A tree as returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct GitTree {
    /// Tree SHA.
    pub sha: String,
    /// The tree entries.
    pub tree: Vec<TreeEntry>,
    /// True if the entry list was cut off by the service.
    #[serde(default)]
    pub truncated: bool,
}

/// Authorship metadata on a commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitUser {
    /// Name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Timestamp (ISO 8601); the service fills it in when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl CommitUser {
    /// Creates authorship metadata with the timestamp left to the service.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            date: None,
        }
    }
}

/// Request body for creating a commit.
#[derive(Debug, Clone, Serialize)]
pub struct NewCommit {
    /// Commit message.
    pub message: String,
    /// SHA of the tree the commit points at.
    pub tree: String,
    /// Parent commit SHAs (empty for a root commit).
    pub parents: Vec<String>,
    /// Author; defaults to the authenticated user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<CommitUser>,
    /// Committer; defaults to the author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committer: Option<CommitUser>,
}

/// A commit as returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct GitCommit {
    /// Commit SHA.
    pub sha: String,
    /// Commit message.
    pub message: String,
    /// The tree the commit points at.
    pub tree: ShaPointer,
    /// Parent commits.
    #[serde(default)]
    pub parents: Vec<ShaPointer>,
    /// Author metadata.
    #[serde(default)]
    pub author: Option<CommitUser>,
    /// Committer metadata.
    #[serde(default)]
    pub committer: Option<CommitUser>,
}

/// The object a reference points at.
#[derive(Debug, Clone, Deserialize)]
pub struct GitObject {
    /// Object SHA.
    pub sha: String,
    /// Object type ("commit" for branch heads).
    #[serde(rename = "type")]
    pub object_type: String,
    /// API URL for the object.
    #[serde(default)]
    pub url: Option<String>,
}

/// A named reference (branch or tag) as returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct GitReference {
    /// Fully qualified reference name (e.g. `refs/heads/main`).
    #[serde(rename = "ref")]
    pub reference: String,
    /// The object the reference points at.
    pub object: GitObject,
}

/// Request body for creating a reference.
#[derive(Debug, Clone, Serialize)]
struct NewRef {
    /// Fully qualified reference name (e.g. `refs/heads/topic`).
    #[serde(rename = "ref")]
    reference: String,
    /// SHA the reference points at.
    sha: String,
}

/// Request body for updating a reference.
#[derive(Debug, Clone, Serialize)]
struct RefUpdate {
    /// SHA to move the reference to.
    sha: String,
    /// Allow a non-fast-forward move.
    force: bool,
}

/// One file in a [`ForgeClient::commit_files`] call.
#[derive(Debug, Clone)]
pub struct CommitFile {
    /// Path of the file within the repository.
    pub path: String,
    /// File mode for the tree entry.
    pub mode: TreeEntryMode,
    /// The content to upload as a blob.
    pub content: NewBlob,
}

impl CommitFile {
    /// Creates a regular text file.
    pub fn text(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: TreeEntryMode::File,
            content: NewBlob::utf8(content),
        }
    }

    /// Creates a regular file from raw bytes.
    pub fn binary(path: impl Into<String>, content: impl AsRef<[u8]>) -> Self {
        Self {
            path: path.into(),
            mode: TreeEntryMode::File,
            content: NewBlob::base64(content),
        }
    }

    /// Overrides the file mode (e.g. executable).
    #[must_use]
    pub fn mode(mut self, mode: TreeEntryMode) -> Self {
        self.mode = mode;
        self
    }
}

impl ForgeClient {
    /// Uploads a blob.
    ///
    /// `POST /repos/{owner}/{repo}/git/blobs`
    pub async fn create_blob(
        &self,
        owner: &str,
        repo: &str,
        blob: &NewBlob,
    ) -> ApiResult<ShaPointer> {
        let res = self
            .post(&format!("repos/{owner}/{repo}/git/blobs"))
            .json(blob)
            .send()
            .await?;
        Self::decode(res).await
    }

    /// Retrieves a blob by SHA.
    ///
    /// `GET /repos/{owner}/{repo}/git/blobs/{sha}`
    pub async fn get_blob(&self, owner: &str, repo: &str, sha: &str) -> ApiResult<GitBlob> {
        let res = self
            .get(&format!("repos/{owner}/{repo}/git/blobs/{sha}"))
            .send()
            .await?;
        Self::decode(res).await
    }

    /// Creates a tree.
    ///
    /// `POST /repos/{owner}/{repo}/git/trees`
    pub async fn create_tree(&self, owner: &str, repo: &str, tree: &NewTree) -> ApiResult<GitTree> {
        let res = self
            .post(&format!("repos/{owner}/{repo}/git/trees"))
            .json(tree)
            .send()
            .await?;
        Self::decode(res).await
    }

    /// Retrieves a tree by SHA, optionally descending into subtrees.
    ///
    /// `GET /repos/{owner}/{repo}/git/trees/{sha}[?recursive=1]`
    pub async fn get_tree(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        recursive: bool,
    ) -> ApiResult<GitTree> {
        let mut request = self.get(&format!("repos/{owner}/{repo}/git/trees/{sha}"));
        if recursive {
            request = request.query(&[("recursive", "1")]);
        }
        let res = request.send().await?;
        Self::decode(res).await
    }

    /// Creates a commit object.
    ///
    /// `POST /repos/{owner}/{repo}/git/commits`
    pub async fn create_commit(
        &self,
        owner: &str,
        repo: &str,
        commit: &NewCommit,
    ) -> ApiResult<GitCommit> {
        let res = self
            .post(&format!("repos/{owner}/{repo}/git/commits"))
            .json(commit)
            .send()
            .await?;
        Self::decode(res).await
    }

    /// Retrieves a commit object by SHA.
    ///
    /// `GET /repos/{owner}/{repo}/git/commits/{sha}`
    pub async fn get_commit(&self, owner: &str, repo: &str, sha: &str) -> ApiResult<GitCommit> {
        let res = self
            .get(&format!("repos/{owner}/{repo}/git/commits/{sha}"))
            .send()
            .await?;
        Self::decode(res).await
    }

    /// Retrieves a reference.
    ///
    /// `GET /repos/{owner}/{repo}/git/refs/{ref}`
    ///
    /// `reference` is the short form without the `refs/` prefix, e.g.
    /// `heads/main` or `tags/v1.0`.
    pub async fn get_ref(&self, owner: &str, repo: &str, reference: &str) -> ApiResult<GitReference> {
        let res = self
            .get(&format!("repos/{owner}/{repo}/git/refs/{reference}"))
            .send()
            .await?;
        Self::decode(res).await
    }

    /// Creates a reference.
    ///
    /// `POST /repos/{owner}/{repo}/git/refs`
    ///
    /// `reference` is the fully qualified name, e.g. `refs/heads/topic`.
    pub async fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
        sha: &str,
    ) -> ApiResult<GitReference> {
        let body = NewRef {
            reference: reference.to_string(),
            sha: sha.to_string(),
        };
        let res = self
            .post(&format!("repos/{owner}/{repo}/git/refs"))
            .json(&body)
            .send()
            .await?;
        Self::decode(res).await
    }

    /// Moves a reference to a new commit.
    ///
    /// `PATCH /repos/{owner}/{repo}/git/refs/{ref}`
    ///
    /// `reference` is the short form without the `refs/` prefix. A
    /// non-forced update is rejected by the service unless it is a
    /// fast-forward.
    pub async fn update_ref(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
        sha: &str,
        force: bool,
    ) -> ApiResult<GitReference> {
        let body = RefUpdate {
            sha: sha.to_string(),
            force,
        };
        let res = self
            .patch(&format!("repos/{owner}/{repo}/git/refs/{reference}"))
            .json(&body)
            .send()
            .await?;
        Self::decode(res).await
    }

    /// Commits a set of files to a branch.
    ///
    /// The fixed five-call choreography of the git data API:
    ///
    /// 1. fetch the current tip of `branch`;
    /// 2. upload one blob per file (concurrently — the uploads have no
    ///    ordering dependency on each other);
    /// 3. create a tree layering the new entries over the current tip,
    ///    so paths not named here survive;
    /// 4. create a commit pointing at the new tree, with the old tip as
    ///    its single parent;
    /// 5. advance the branch reference to the new commit (non-forced).
    ///
    /// # Errors
    ///
    /// * [`ApiError::EmptyCommit`] - `files` is empty; nothing is sent
    /// * [`ApiError::Api`](crate::ApiError::Api) - branch missing (404 on
    ///   step 1), or any step rejected by the service; there is no
    ///   partial-failure recovery
    /// * [`ApiError::RefUpdateMismatch`] - the service acknowledged the
    ///   reference update but reports a tip other than the new commit
    pub async fn commit_files(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        message: &str,
        files: &[CommitFile],
        author: Option<CommitUser>,
    ) -> ApiResult<GitCommit> {
        if files.is_empty() {
            return Err(ApiError::EmptyCommit);
        }

        let ref_name = format!("heads/{branch}");
        let tip = self.get_ref(owner, repo, &ref_name).await?;
        let parent_sha = tip.object.sha;
        tracing::debug!(%owner, %repo, %branch, parent = %parent_sha, files = files.len(), "composing commit");

        let blobs = try_join_all(
            files
                .iter()
                .map(|file| self.create_blob(owner, repo, &file.content)),
        )
        .await?;

        // try_join_all preserves input order, so entries pair with their
        // blob shas by index.
        let entries = files
            .iter()
            .zip(&blobs)
            .map(|(file, blob)| NewTreeEntry::blob(&file.path, file.mode, &blob.sha))
            .collect();

        let tree = self
            .create_tree(
                owner,
                repo,
                &NewTree {
                    base_tree: Some(parent_sha.clone()),
                    tree: entries,
                },
            )
            .await?;
        tracing::debug!(tree = %tree.sha, "created tree");

        let commit = self
            .create_commit(
                owner,
                repo,
                &NewCommit {
                    message: message.to_string(),
                    tree: tree.sha,
                    parents: vec![parent_sha],
                    author,
                    committer: None,
                },
            )
            .await?;
        tracing::debug!(commit = %commit.sha, "created commit");

        let updated = self
            .update_ref(owner, repo, &ref_name, &commit.sha, false)
            .await?;
        if updated.object.sha != commit.sha {
            return Err(ApiError::RefUpdateMismatch {
                expected: commit.sha,
                actual: updated.object.sha,
            });
        }

        Ok(commit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ref_json(name: &str, sha: &str) -> serde_json::Value {
        serde_json::json!({
            "ref": format!("refs/{name}"),
            "object": { "sha": sha, "type": "commit", "url": null }
        })
    }

    #[tokio::test]
    async fn test_create_blob_posts_content_and_encoding() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/alice/widget/git/blobs"))
            .and(body_json(serde_json::json!({
                "content": "hello world",
                "encoding": "utf-8"
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({ "sha": "b1" })),
            )
            .mount(&mock_server)
            .await;

        let client = ForgeClient::new(mock_server.uri());
        let created = client
            .create_blob("alice", "widget", &NewBlob::utf8("hello world"))
            .await
            .unwrap();

        assert_eq!(created.sha, "b1");
    }

    #[tokio::test]
    async fn test_get_blob_decodes_wrapped_base64() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/alice/widget/git/blobs/b1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sha": "b1",
                "size": 11,
                "content": "aGVsbG8g\nd29ybGQ=\n",
                "encoding": "base64"
            })))
            .mount(&mock_server)
            .await;

        let client = ForgeClient::new(mock_server.uri());
        let blob = client.get_blob("alice", "widget", "b1").await.unwrap();

        assert_eq!(blob.decode().unwrap(), b"hello world");
    }

    #[tokio::test]
    async fn test_get_tree_recursive_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/alice/widget/git/trees/t1"))
            .and(query_param("recursive", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sha": "t1",
                "tree": [
                    { "path": "src/lib.rs", "mode": "100644", "type": "blob", "sha": "b1", "size": 10 },
                    { "path": "src", "mode": "040000", "type": "tree", "sha": "t2" }
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = ForgeClient::new(mock_server.uri());
        let tree = client.get_tree("alice", "widget", "t1", true).await.unwrap();

        assert_eq!(tree.tree.len(), 2);
        assert_eq!(tree.tree[0].mode, TreeEntryMode::File);
        assert_eq!(tree.tree[1].entry_type, TreeEntryType::Tree);
        assert!(!tree.truncated);
    }

    #[tokio::test]
    async fn test_get_ref_hits_short_form_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/alice/widget/git/refs/heads/main"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ref_json("heads/main", "c0")))
            .mount(&mock_server)
            .await;

        let client = ForgeClient::new(mock_server.uri());
        let reference = client.get_ref("alice", "widget", "heads/main").await.unwrap();

        assert_eq!(reference.reference, "refs/heads/main");
        assert_eq!(reference.object.sha, "c0");
        assert_eq!(reference.object.object_type, "commit");
    }

    #[tokio::test]
    async fn test_create_ref_posts_qualified_name() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/alice/widget/git/refs"))
            .and(body_json(serde_json::json!({
                "ref": "refs/heads/topic",
                "sha": "c9"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(ref_json("heads/topic", "c9")))
            .mount(&mock_server)
            .await;

        let client = ForgeClient::new(mock_server.uri());
        let reference = client
            .create_ref("alice", "widget", "refs/heads/topic", "c9")
            .await
            .unwrap();

        assert_eq!(reference.object.sha, "c9");
    }

    #[tokio::test]
    async fn test_update_ref_patches_sha_and_force() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/repos/alice/widget/git/refs/heads/main"))
            .and(body_json(serde_json::json!({ "sha": "c9", "force": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ref_json("heads/main", "c9")))
            .mount(&mock_server)
            .await;

        let client = ForgeClient::new(mock_server.uri());
        let reference = client
            .update_ref("alice", "widget", "heads/main", "c9", true)
            .await
            .unwrap();

        assert_eq!(reference.object.sha, "c9");
    }

    /// Mounts the five choreography endpoints; the branch tip answer on
    /// the final PATCH is the caller's choice.
    async fn mount_commit_choreography(mock_server: &MockServer, final_tip: &str) {
        Mock::given(method("GET"))
            .and(path("/repos/alice/widget/git/refs/heads/main"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ref_json("heads/main", "c0")))
            .mount(mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/repos/alice/widget/git/blobs"))
            .and(body_partial_json(serde_json::json!({ "content": "fn main() {}\n" })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({ "sha": "b-main" })),
            )
            .mount(mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/repos/alice/widget/git/blobs"))
            .and(body_partial_json(serde_json::json!({ "content": "# widget\n" })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({ "sha": "b-readme" })),
            )
            .mount(mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/repos/alice/widget/git/trees"))
            .and(body_json(serde_json::json!({
                "base_tree": "c0",
                "tree": [
                    { "path": "src/main.rs", "mode": "100644", "type": "blob", "sha": "b-main" },
                    { "path": "README.md", "mode": "100644", "type": "blob", "sha": "b-readme" }
                ]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "sha": "t1",
                "tree": []
            })))
            .mount(mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/repos/alice/widget/git/commits"))
            .and(body_json(serde_json::json!({
                "message": "add widget",
                "tree": "t1",
                "parents": ["c0"],
                "author": { "name": "Alice", "email": "alice@example.com" }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "sha": "c1",
                "message": "add widget",
                "tree": { "sha": "t1" },
                "parents": [{ "sha": "c0" }]
            })))
            .mount(mock_server)
            .await;

        Mock::given(method("PATCH"))
            .and(path("/repos/alice/widget/git/refs/heads/main"))
            .and(body_json(serde_json::json!({ "sha": "c1", "force": false })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ref_json("heads/main", final_tip)))
            .mount(mock_server)
            .await;
    }

    #[tokio::test]
    async fn test_commit_files_runs_full_choreography() {
        let mock_server = MockServer::start().await;
        mount_commit_choreography(&mock_server, "c1").await;

        let client = ForgeClient::new(mock_server.uri());
        let files = vec![
            CommitFile::text("src/main.rs", "fn main() {}\n"),
            CommitFile::text("README.md", "# widget\n"),
        ];
        let commit = client
            .commit_files(
                "alice",
                "widget",
                "main",
                "add widget",
                &files,
                Some(CommitUser::new("Alice", "alice@example.com")),
            )
            .await
            .unwrap();

        assert_eq!(commit.sha, "c1");
        assert_eq!(commit.tree.sha, "t1");
        assert_eq!(commit.parents[0].sha, "c0");
    }

    #[tokio::test]
    async fn test_commit_files_reports_ref_update_mismatch() {
        let mock_server = MockServer::start().await;
        mount_commit_choreography(&mock_server, "c-other").await;

        let client = ForgeClient::new(mock_server.uri());
        let files = vec![
            CommitFile::text("src/main.rs", "fn main() {}\n"),
            CommitFile::text("README.md", "# widget\n"),
        ];
        let err = client
            .commit_files(
                "alice",
                "widget",
                "main",
                "add widget",
                &files,
                Some(CommitUser::new("Alice", "alice@example.com")),
            )
            .await
            .unwrap_err();

        match err {
            ApiError::RefUpdateMismatch { expected, actual } => {
                assert_eq!(expected, "c1");
                assert_eq!(actual, "c-other");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_commit_files_rejects_empty_file_set() {
        // No server needed: the empty set fails before any request.
        let client = ForgeClient::new("http://127.0.0.1:1");
        let err = client
            .commit_files("alice", "widget", "main", "noop", &[], None)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::EmptyCommit));
    }

    #[test]
    fn test_binary_commit_file_is_base64_encoded() {
        let file = CommitFile::binary("logo.png", [0x89u8, 0x50, 0x4e, 0x47]);
        assert_eq!(file.content.encoding, BlobEncoding::Base64);
        assert_eq!(file.content.content, "iVBORw==");
    }

    #[test]
    fn test_tree_entry_mode_serializes_as_octal_string() {
        let entry = NewTreeEntry::blob("bin/run", TreeEntryMode::Executable, "b1");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["mode"], "100755");
        assert_eq!(json["type"], "blob");
    }
}
