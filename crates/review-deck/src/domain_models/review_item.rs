//! Reviewable item model
//!
//! A pull request snapshot as returned by the listing call. Items are
//! never mutated after creation; the store only moves them between the
//! queue and the history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use swipe_config::AppConfig;

/// Identity of a reviewable item: repository plus number
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey {
    /// Repository in `owner/repo` form
    pub repository: String,
    /// Pull request number
    pub number: u64,
}

impl ItemKey {
    pub fn new(repository: impl Into<String>, number: u64) -> Self {
        Self {
            repository: repository.into(),
            number,
        }
    }

    /// Stable render key used by the deck
    pub fn render_key(&self) -> String {
        format!("pr-{}-{}", self.repository, self.number)
    }

    /// Split the repository into `(owner, name)`
    pub fn owner_and_name(&self) -> Option<(&str, &str)> {
        split_repository(&self.repository)
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.repository, self.number)
    }
}

/// Split `owner/repo` into its parts, rejecting empty halves
pub fn split_repository(full_name: &str) -> Option<(&str, &str)> {
    let (owner, name) = full_name.split_once('/')?;
    if owner.is_empty() || name.is_empty() {
        return None;
    }
    Some((owner, name))
}

/// What the reviewer decided for an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disposition {
    Merge,
    Close,
}

impl Disposition {
    /// Past-tense label for status lines
    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Merge => "merged",
            Self::Close => "closed",
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Merge => f.write_str("merge"),
            Self::Close => f.write_str("close"),
        }
    }
}

/// Where a load pulls its items from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewSource {
    /// Every repository the viewer can push to
    AllRepositories,
    /// A single `owner/repo`
    Repository(String),
}

impl From<&AppConfig> for ReviewSource {
    fn from(config: &AppConfig) -> Self {
        match config.repository_source() {
            Some(repository) => Self::Repository(repository.to_string()),
            None => Self::AllRepositories,
        }
    }
}

impl fmt::Display for ReviewSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllRepositories => f.write_str("all repositories"),
            Self::Repository(name) => f.write_str(name),
        }
    }
}

/// Author profile attached to an item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewAuthor {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub public_repos: u64,
    pub followers: u64,
}

impl ReviewAuthor {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            ..Self::default()
        }
    }

    /// Name to show on a card
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}

/// Size and activity statistics of an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub additions: u64,
    pub deletions: u64,
    pub changed_files: u64,
    pub commits: u64,
    pub comments: u64,
    pub review_comments: u64,
    pub requested_reviewers: Vec<String>,
    pub labels: Vec<String>,
    pub mergeable: Option<bool>,
    pub draft: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub age_days: i64,
}

impl Default for ReviewStats {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            additions: 0,
            deletions: 0,
            changed_files: 0,
            commits: 0,
            comments: 0,
            review_comments: 0,
            requested_reviewers: Vec::new(),
            labels: Vec::new(),
            mergeable: None,
            draft: false,
            created_at: now,
            updated_at: now,
            age_days: 0,
        }
    }
}

/// A pull request waiting for a decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub key: ItemKey,
    pub title: String,
    pub body: Option<String>,
    pub html_url: String,
    pub head_branch: String,
    pub base_branch: String,
    pub author: ReviewAuthor,
    pub stats: ReviewStats,
    /// Short generated blurb shown on the card
    pub bio: String,
    /// 0..=100 "how easy is this to land" score
    pub compatibility: u8,
}

impl ReviewItem {
    /// Create an item with empty metadata; insights are derived from the stats
    pub fn new(key: ItemKey, title: impl Into<String>) -> Self {
        Self::with_details(key, title, ReviewAuthor::default(), ReviewStats::default())
    }

    /// Create an item and derive its bio and compatibility score
    pub fn with_details(
        key: ItemKey,
        title: impl Into<String>,
        author: ReviewAuthor,
        stats: ReviewStats,
    ) -> Self {
        let bio = super::insights::generate_bio(&stats);
        let compatibility = super::insights::compatibility_score(&stats);
        Self {
            key,
            title: title.into(),
            body: None,
            html_url: String::new(),
            head_branch: String::new(),
            base_branch: String::new(),
            author,
            stats,
            bio,
            compatibility,
        }
    }

    /// Set the HTML URL
    pub fn with_html_url(mut self, url: impl Into<String>) -> Self {
        self.html_url = url.into();
        self
    }
}

/// Drop later occurrences of a key, keeping listing order
pub fn dedup_items(items: Vec<ReviewItem>) -> Vec<ReviewItem> {
    let mut seen = HashSet::with_capacity(items.len());
    let before = items.len();
    let unique: Vec<ReviewItem> = items
        .into_iter()
        .filter(|item| seen.insert(item.key.clone()))
        .collect();

    if unique.len() != before {
        log::warn!(
            "Dropped {} duplicate item(s) from listing",
            before - unique.len()
        );
    }
    unique
}
