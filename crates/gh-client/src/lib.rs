//! GitHub API client for the review deck
//!
//! This crate provides a trait-based GitHub API client. The trait is the
//! seam the review gateway depends on, so tests can substitute a double
//! while the binary uses the octocrab implementation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - current_user() / fetch_user()                 │
//! │  - list_repositories() / fetch_repository()      │
//! │  - fetch_pull_requests() / fetch_pull_request()  │
//! │  - merge_pull_request() / close_pull_request()   │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//!              ┌─────────────────┐
//!              │ OctocrabClient  │
//!              │ (direct API)    │
//!              └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{connect, GitHubClient, TokenResolver};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = connect(&TokenResolver::new(), None).await?;
//! let me = client.current_user().await?;
//! let prs = client.fetch_pull_requests(&me.login, "dotfiles").await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod octocrab_client;
pub mod types;

/// Default GitHub host (public GitHub)
pub const DEFAULT_HOST: &str = "github.com";

pub use auth::{api_base_url, connect, TokenResolver};
pub use client::GitHubClient;
pub use octocrab_client::OctocrabClient;
pub use types::{
    MergeMethod, MergeResult, PullRequest, RepositoryOwner, RepositoryPermissions,
    RepositorySummary, UserProfile,
};

// Re-export octocrab so consumers don't need to depend on it directly
pub use octocrab;
