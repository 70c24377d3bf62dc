//! GitHub client trait definition
//!
//! This module defines the core `GitHubClient` trait that all client
//! implementations must satisfy.

use crate::types::{MergeMethod, MergeResult, PullRequest, RepositorySummary, UserProfile};
use async_trait::async_trait;

/// GitHub API client trait
///
/// Defines the interface for interacting with the GitHub API.
/// Implementations can be direct (hitting the API) or test doubles.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::{GitHubClient, PullRequest};
///
/// async fn list_prs(client: &dyn GitHubClient) -> anyhow::Result<Vec<PullRequest>> {
///     client.fetch_pull_requests("rust-lang", "rust").await
/// }
/// ```
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Fetch the profile of the authenticated user
    ///
    /// Fails when the token is missing, expired or revoked.
    async fn current_user(&self) -> anyhow::Result<UserProfile>;

    /// Fetch the public profile of any user
    async fn fetch_user(&self, login: &str) -> anyhow::Result<UserProfile>;

    /// List every repository the authenticated user owns, collaborates on,
    /// or can see through an organization membership
    async fn list_repositories(&self) -> anyhow::Result<Vec<RepositorySummary>>;

    /// Fetch a single repository, including the viewer's permissions on it
    async fn fetch_repository(&self, owner: &str, repo: &str)
        -> anyhow::Result<RepositorySummary>;

    /// Fetch open pull requests for a repository
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner (user or organization)
    /// * `repo` - Repository name
    ///
    /// # Returns
    ///
    /// Every open pull request, across all pages. Detail-only counters (additions, commits, ...)
    /// are zero; use `fetch_pull_request` to fill them in.
    async fn fetch_pull_requests(&self, owner: &str, repo: &str)
        -> anyhow::Result<Vec<PullRequest>>;

    /// Fetch a single pull request by number
    ///
    /// This returns full PR details including additions/deletions
    /// which are not available in the list endpoint.
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequest>;

    /// Merge a pull request
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    /// * `pr_number` - Pull request number
    /// * `merge_method` - How to merge (merge commit, squash, or rebase)
    async fn merge_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        merge_method: MergeMethod,
    ) -> anyhow::Result<MergeResult>;

    /// Close a pull request without merging
    async fn close_pull_request(&self, owner: &str, repo: &str, pr_number: u64)
        -> anyhow::Result<()>;
}
