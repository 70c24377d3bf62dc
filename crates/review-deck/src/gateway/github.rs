//! GitHub-backed gateway
//!
//! Lists open pull requests of the repositories the viewer can push to,
//! enriches them with author profiles and insights, and applies merges
//! and closes through a `GitHubClient`.

use super::ReviewGateway;
use crate::domain_models::{
    split_repository, Disposition, ItemKey, ReviewAuthor, ReviewItem, ReviewSource, ReviewStats,
};
use crate::error::GatewayError;
use async_trait::async_trait;
use chrono::Utc;
use gh_client::{GitHubClient, MergeMethod, PullRequest, UserProfile};
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use swipe_config::{AppConfig, MergeStrategy};
use tokio::sync::Mutex;

pub struct GitHubGateway<C: GitHubClient> {
    client: C,
    merge_method: MergeMethod,
    request_timeout: Duration,
    /// Author profiles fetched during this session, keyed by login
    profiles: Mutex<HashMap<String, ReviewAuthor>>,
}

impl<C: GitHubClient> GitHubGateway<C> {
    pub fn new(client: C, merge_method: MergeMethod, request_timeout: Duration) -> Self {
        Self {
            client,
            merge_method,
            request_timeout,
            profiles: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(client: C, config: &AppConfig) -> Self {
        Self::new(
            client,
            merge_method(config.merge_method),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Run one client call under the request timeout
    async fn bounded<T>(
        &self,
        call: impl Future<Output = anyhow::Result<T>> + Send,
    ) -> Result<T, GatewayError> {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => result.map_err(GatewayError::from),
            Err(_) => Err(GatewayError::TimedOut(self.request_timeout.as_secs())),
        }
    }

    async fn repositories(&self, source: &ReviewSource) -> Result<Vec<String>, GatewayError> {
        match source {
            ReviewSource::Repository(name) => {
                let (owner, repo) = split_repository(name)
                    .ok_or_else(|| GatewayError::InvalidRepository(name.clone()))?;
                let summary = self
                    .bounded(self.client.fetch_repository(owner, repo))
                    .await?;
                if !summary.can_push() {
                    return Err(GatewayError::PermissionDenied(name.clone()));
                }
                Ok(vec![name.clone()])
            }
            ReviewSource::AllRepositories => {
                let repositories = self.bounded(self.client.list_repositories()).await?;
                let writable: Vec<String> = repositories
                    .into_iter()
                    .filter(|repo| repo.can_push())
                    .map(|repo| repo.full_name)
                    .collect();
                log::debug!("{} repositories with push access", writable.len());
                Ok(writable)
            }
        }
    }

    /// Open pull requests of one repository, with detail counters filled in
    /// where the detail call succeeds
    async fn repository_items(&self, full_name: &str) -> Result<Vec<ReviewItem>, GatewayError> {
        let (owner, name) = split_repository(full_name)
            .ok_or_else(|| GatewayError::InvalidRepository(full_name.to_string()))?;

        let pulls = self
            .bounded(self.client.fetch_pull_requests(owner, name))
            .await?;

        let mut items = Vec::with_capacity(pulls.len());
        for listed in pulls {
            let pr = match self
                .bounded(self.client.fetch_pull_request(owner, name, listed.number))
                .await
            {
                Ok(detailed) => detailed,
                Err(e) => {
                    log::debug!(
                        "Using listing data for {}#{}: {}",
                        full_name,
                        listed.number,
                        e
                    );
                    listed
                }
            };
            let author = self.author_profile(&pr.author).await;
            items.push(review_item(full_name, pr, author));
        }
        Ok(items)
    }

    async fn author_profile(&self, login: &str) -> ReviewAuthor {
        if let Some(author) = self.profiles.lock().await.get(login) {
            return author.clone();
        }

        let profile = match self.bounded(self.client.fetch_user(login)).await {
            Ok(profile) => profile,
            Err(e) => {
                log::debug!("Falling back to placeholder profile for {}: {}", login, e);
                UserProfile::placeholder(login)
            }
        };
        let author = review_author(profile);
        self.profiles
            .lock()
            .await
            .insert(login.to_string(), author.clone());
        author
    }
}

#[async_trait]
impl<C: GitHubClient> ReviewGateway for GitHubGateway<C> {
    async fn list_review_items(
        &self,
        source: &ReviewSource,
    ) -> Result<Vec<ReviewItem>, GatewayError> {
        let repositories = self.repositories(source).await?;

        let mut items = Vec::new();
        for full_name in &repositories {
            match self.repository_items(full_name).await {
                Ok(mut repo_items) => items.append(&mut repo_items),
                // A single requested repository has nothing to fall back on
                Err(e) if matches!(source, ReviewSource::Repository(_)) => return Err(e),
                Err(e) => log::warn!("Skipping {}: {}", full_name, e),
            }
        }

        if *source == ReviewSource::AllRepositories {
            items.shuffle(&mut rand::thread_rng());
        }
        Ok(items)
    }

    async fn apply_disposition(
        &self,
        item: &ReviewItem,
        disposition: Disposition,
    ) -> Result<(), GatewayError> {
        let (owner, name) = item
            .key
            .owner_and_name()
            .ok_or_else(|| GatewayError::InvalidRepository(item.key.repository.clone()))?;

        match disposition {
            Disposition::Merge => {
                // The client reports a refused merge as an error
                self.bounded(self.client.merge_pull_request(
                    owner,
                    name,
                    item.key.number,
                    self.merge_method,
                ))
                .await?;
            }
            Disposition::Close => {
                self.bounded(self.client.close_pull_request(owner, name, item.key.number))
                    .await?;
            }
        }
        Ok(())
    }
}

pub fn merge_method(strategy: MergeStrategy) -> MergeMethod {
    match strategy {
        MergeStrategy::Merge => MergeMethod::Merge,
        MergeStrategy::Squash => MergeMethod::Squash,
        MergeStrategy::Rebase => MergeMethod::Rebase,
    }
}

fn review_author(profile: UserProfile) -> ReviewAuthor {
    ReviewAuthor {
        login: profile.login,
        avatar_url: profile.avatar_url,
        html_url: profile.html_url,
        name: profile.name,
        bio: profile.bio,
        public_repos: profile.public_repos,
        followers: profile.followers,
    }
}

fn review_item(full_name: &str, pr: PullRequest, author: ReviewAuthor) -> ReviewItem {
    let stats = ReviewStats {
        additions: pr.additions,
        deletions: pr.deletions,
        changed_files: pr.changed_files,
        commits: pr.commits,
        comments: pr.comments,
        review_comments: pr.review_comments,
        requested_reviewers: pr.requested_reviewers,
        labels: pr.labels,
        mergeable: pr.mergeable,
        draft: pr.draft,
        created_at: pr.created_at,
        updated_at: pr.updated_at,
        age_days: (Utc::now() - pr.created_at).num_days(),
    };

    let mut item = ReviewItem::with_details(
        ItemKey::new(full_name, pr.number),
        pr.title,
        author,
        stats,
    )
    .with_html_url(pr.html_url);
    item.body = pr.body;
    item.head_branch = pr.head_branch;
    item.base_branch = pr.base_branch;
    item
}
