//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab library.

use crate::client::GitHubClient;
use crate::types::{MergeMethod, MergeResult, PullRequest, RepositorySummary, UserProfile};
use anyhow::bail;
use async_trait::async_trait;
use log::debug;
use octocrab::Octocrab;
use serde::Serialize;
use std::sync::Arc;

const PER_PAGE: u8 = 30;
const REPOS_PER_PAGE: u8 = 100;

/// Query parameters for `GET /user/repos`
#[derive(Debug, Serialize)]
struct RepositoryListParams {
    page: u32,
    per_page: u8,
    sort: &'static str,
    affiliation: &'static str,
}

/// Direct GitHub API client using octocrab
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }

    /// Get a reference to the underlying octocrab instance
    pub fn octocrab(&self) -> &Octocrab {
        &self.octocrab
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn current_user(&self) -> anyhow::Result<UserProfile> {
        debug!("Fetching authenticated user");
        let profile: UserProfile = self.octocrab.get("/user", None::<&()>).await?;
        Ok(profile)
    }

    async fn fetch_user(&self, login: &str) -> anyhow::Result<UserProfile> {
        debug!("Fetching profile for {}", login);
        let route = format!("/users/{}", login);
        let profile: UserProfile = self.octocrab.get(route, None::<&()>).await?;
        Ok(profile)
    }

    async fn list_repositories(&self) -> anyhow::Result<Vec<RepositorySummary>> {
        let mut repos = Vec::new();
        let mut params = RepositoryListParams {
            page: 1,
            per_page: REPOS_PER_PAGE,
            sort: "updated",
            affiliation: "owner,collaborator,organization_member",
        };

        loop {
            let page: Vec<RepositorySummary> =
                self.octocrab.get("/user/repos", Some(&params)).await?;
            let page_len = page.len();
            repos.extend(page);

            if is_last_page(page_len, params.per_page) {
                break;
            }
            params.page += 1;
        }

        debug!("Listed {} repositories for the viewer", repos.len());
        Ok(repos)
    }

    async fn fetch_repository(
        &self,
        owner: &str,
        repo: &str,
    ) -> anyhow::Result<RepositorySummary> {
        debug!("Fetching repository {}/{}", owner, repo);
        let route = format!("/repos/{}/{}", owner, repo);
        let summary: RepositorySummary = self.octocrab.get(route, None::<&()>).await?;
        Ok(summary)
    }

    async fn fetch_pull_requests(
        &self,
        owner: &str,
        repo: &str,
    ) -> anyhow::Result<Vec<PullRequest>> {
        debug!("Fetching PRs for {}/{}", owner, repo);

        let mut prs = Vec::new();
        let mut page_num = 1u32;

        loop {
            let page = self
                .octocrab
                .pulls(owner, repo)
                .list()
                .state(octocrab::params::State::Open)
                .per_page(PER_PAGE)
                .page(page_num)
                .send()
                .await?;
            let page_len = page.items.len();
            prs.extend(page.items.iter().map(convert_pull_request));

            if is_last_page(page_len, PER_PAGE) {
                break;
            }

            page_num += 1;
        }

        debug!("Fetched {} PRs for {}/{}", prs.len(), owner, repo);
        Ok(prs)
    }

    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequest> {
        debug!("Fetching PR details for {}/{}#{}", owner, repo, pr_number);
        let pr = self.octocrab.pulls(owner, repo).get(pr_number).await?;
        Ok(convert_pull_request(&pr))
    }

    async fn merge_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        merge_method: MergeMethod,
    ) -> anyhow::Result<MergeResult> {
        debug!(
            "Merging {}/{}#{} with {:?}",
            owner, repo, pr_number, merge_method
        );

        let merge = self
            .octocrab
            .pulls(owner, repo)
            .merge(pr_number)
            .method(convert_merge_method(merge_method))
            .send()
            .await?;

        if !merge.merged {
            bail!(
                "GitHub refused to merge PR #{} in {}/{}: {}",
                pr_number,
                owner,
                repo,
                merge.message.unwrap_or_default()
            );
        }

        Ok(MergeResult {
            merged: merge.merged,
            sha: merge.sha,
            message: merge.message.unwrap_or_default(),
        })
    }

    async fn close_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<()> {
        debug!("Closing {}/{}#{}", owner, repo, pr_number);

        let route = format!("/repos/{}/{}/pulls/{}", owner, repo, pr_number);
        let body = serde_json::json!({ "state": "closed" });
        let _: serde_json::Value = self.octocrab.patch(route, Some(&body)).await?;

        Ok(())
    }
}

/// A short page means there is nothing after it
fn is_last_page(page_len: usize, per_page: u8) -> bool {
    page_len < per_page as usize
}

/// Convert octocrab PullRequest to our PullRequest type
fn convert_pull_request(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        title: pr.title.clone().unwrap_or_default(),
        body: pr.body.clone(),
        author: pr
            .user
            .as_ref()
            .map(|u| u.login.clone())
            .unwrap_or_else(|| "unknown".to_string()),
        head_sha: pr.head.sha.clone(),
        base_branch: pr.base.ref_field.clone(),
        head_branch: pr.head.ref_field.clone(),
        mergeable: pr.mergeable,
        draft: pr.draft.unwrap_or(false),
        labels: pr
            .labels
            .as_ref()
            .map(|labels| labels.iter().map(|l| l.name.to_lowercase()).collect())
            .unwrap_or_default(),
        requested_reviewers: pr
            .requested_reviewers
            .as_ref()
            .map(|reviewers| reviewers.iter().map(|r| r.login.clone()).collect())
            .unwrap_or_default(),
        created_at: pr.created_at.unwrap_or_else(chrono::Utc::now),
        updated_at: pr.updated_at.unwrap_or_else(chrono::Utc::now),
        html_url: pr
            .html_url
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_default(),
        additions: pr.additions.unwrap_or(0),
        deletions: pr.deletions.unwrap_or(0),
        changed_files: pr.changed_files.unwrap_or(0),
        commits: pr.commits.unwrap_or(0),
        comments: pr.comments.unwrap_or(0),
        review_comments: pr.review_comments.unwrap_or(0),
    }
}

/// Convert our merge method to the octocrab parameter
fn convert_merge_method(method: MergeMethod) -> octocrab::params::pulls::MergeMethod {
    match method {
        MergeMethod::Merge => octocrab::params::pulls::MergeMethod::Merge,
        MergeMethod::Squash => octocrab::params::pulls::MergeMethod::Squash,
        MergeMethod::Rebase => octocrab::params::pulls::MergeMethod::Rebase,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_merge_method() {
        assert!(matches!(
            convert_merge_method(MergeMethod::Merge),
            octocrab::params::pulls::MergeMethod::Merge
        ));
        assert!(matches!(
            convert_merge_method(MergeMethod::Squash),
            octocrab::params::pulls::MergeMethod::Squash
        ));
        assert!(matches!(
            convert_merge_method(MergeMethod::Rebase),
            octocrab::params::pulls::MergeMethod::Rebase
        ));
    }

    #[test]
    fn test_paging_collects_every_open_pr() {
        // 80 open PRs arrive as pages of 30, 30 and 20
        let open = 80usize;
        let mut fetched = 0;
        let mut requests = 0;
        loop {
            let page_len = (open - fetched).min(PER_PAGE as usize);
            requests += 1;
            fetched += page_len;
            if is_last_page(page_len, PER_PAGE) {
                break;
            }
        }
        assert_eq!(fetched, 80);
        assert_eq!(requests, 3);
    }

    #[test]
    fn test_full_page_asks_for_more() {
        assert!(!is_last_page(30, PER_PAGE));
        assert!(is_last_page(29, PER_PAGE));
        assert!(is_last_page(0, PER_PAGE));
        assert!(!is_last_page(100, REPOS_PER_PAGE));
    }

    #[test]
    fn test_repository_list_params_serialize() {
        let params = RepositoryListParams {
            page: 2,
            per_page: REPOS_PER_PAGE,
            sort: "updated",
            affiliation: "owner",
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["page"], 2);
        assert_eq!(json["per_page"], 100);
        assert_eq!(json["affiliation"], "owner");
    }
}
