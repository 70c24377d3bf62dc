//! GitHub API data transfer objects
//!
//! These types represent the data returned from the GitHub API.
//! They are intentionally separate from application domain models
//! to keep this crate pure and reusable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pull request from the GitHub API, including the detail-only counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number (e.g., 123)
    pub number: u64,

    /// PR title
    pub title: String,

    /// PR body/description
    pub body: Option<String>,

    /// Author's GitHub username
    pub author: String,

    /// HEAD commit SHA
    pub head_sha: String,

    /// Base branch name (e.g., "main")
    pub base_branch: String,

    /// HEAD branch name (e.g., "feature/foo")
    pub head_branch: String,

    /// Whether the PR is mergeable (null if not yet computed by GitHub)
    pub mergeable: Option<bool>,

    /// Whether the PR is a draft
    #[serde(default)]
    pub draft: bool,

    /// Lower-cased label names
    #[serde(default)]
    pub labels: Vec<String>,

    /// Logins of requested reviewers
    #[serde(default)]
    pub requested_reviewers: Vec<String>,

    /// When the PR was created
    pub created_at: DateTime<Utc>,

    /// When the PR was last updated
    pub updated_at: DateTime<Utc>,

    /// PR URL for opening in browser
    pub html_url: String,

    /// Number of lines added
    #[serde(default)]
    pub additions: u64,

    /// Number of lines deleted
    #[serde(default)]
    pub deletions: u64,

    /// Number of files touched
    #[serde(default)]
    pub changed_files: u64,

    /// Number of commits on the head branch
    #[serde(default)]
    pub commits: u64,

    /// Number of issue comments
    #[serde(default)]
    pub comments: u64,

    /// Number of review comments
    #[serde(default)]
    pub review_comments: u64,
}

/// Public profile of a GitHub user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Login name
    pub login: String,

    /// Avatar image URL
    #[serde(default)]
    pub avatar_url: String,

    /// Profile page URL
    #[serde(default)]
    pub html_url: String,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Profile bio
    #[serde(default)]
    pub bio: Option<String>,

    /// Number of public repositories
    #[serde(default)]
    pub public_repos: u64,

    /// Number of followers
    #[serde(default)]
    pub followers: u64,
}

impl UserProfile {
    /// Profile used when the real one cannot be fetched
    pub fn placeholder(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            ..Self::default()
        }
    }
}

/// Permissions the viewer holds on a repository
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryPermissions {
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub push: bool,
    #[serde(default)]
    pub pull: bool,
}

/// Repository owner as embedded in the repository listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

/// A repository visible to the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySummary {
    /// Repository name without owner
    pub name: String,

    /// "owner/name"
    pub full_name: String,

    /// Owning user or organization
    pub owner: RepositoryOwner,

    /// Viewer permissions (absent on some endpoints)
    #[serde(default)]
    pub permissions: Option<RepositoryPermissions>,
}

impl RepositorySummary {
    /// Whether the viewer may merge or close pull requests here
    pub fn can_push(&self) -> bool {
        self.permissions
            .map(|p| p.push || p.admin)
            .unwrap_or(false)
    }
}

/// Merge method for pull requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMethod {
    /// Create a merge commit
    Merge,
    /// Squash all commits into one
    #[default]
    Squash,
    /// Rebase commits onto the base branch
    Rebase,
}

/// Result of a merge operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeResult {
    /// Whether the merge was successful
    pub merged: bool,
    /// Commit SHA of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge operation
    pub message: String,
}
