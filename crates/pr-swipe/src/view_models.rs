//! View models
//!
//! Plain data the views render, derived from the review state. Keeping
//! formatting here lets the views stay free of domain logic.

use review_deck::{EntryPayload, QueuePhase, ReviewItem, ReviewState};

pub const FILLER_LABEL: &str = "Sponsored";
pub const FILLER_HEADLINE: &str = "Really Cool AI Startup Ad";
pub const FILLER_FOOTER: &str = "Swipe to skip · This could be your startup";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderViewModel {
    pub user: String,
    pub source: String,
    /// "reviewed/total"
    pub progress: String,
    pub merged: usize,
    pub closed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewCardViewModel {
    /// "owner/repo#N"
    pub reference: String,
    pub title: String,
    pub author: String,
    /// "+12 -3 · 4 files · 2 commits · 1 comments"
    pub stats: String,
    pub branches: String,
    pub age: String,
    pub labels: Option<String>,
    pub bio_lines: Vec<String>,
    pub compatibility: u8,
    pub draft: bool,
}

impl ReviewCardViewModel {
    pub fn from_item(item: &ReviewItem) -> Self {
        let stats = &item.stats;
        let comments = stats.comments + stats.review_comments;
        Self {
            reference: item.key.to_string(),
            title: item.title.clone(),
            author: item.author.display_name().to_string(),
            stats: format!(
                "+{} -{} · {} files · {} commits · {} comments",
                stats.additions, stats.deletions, stats.changed_files, stats.commits, comments
            ),
            branches: if item.head_branch.is_empty() {
                String::new()
            } else {
                format!("{} → {}", item.head_branch, item.base_branch)
            },
            age: match stats.age_days {
                d if d < 1 => "opened today".to_string(),
                1 => "opened 1 day ago".to_string(),
                d => format!("opened {} days ago", d),
            },
            labels: (!stats.labels.is_empty()).then(|| stats.labels.join(", ")),
            bio_lines: item.bio.lines().map(str::to_string).collect(),
            compatibility: item.compatibility,
            draft: stats.draft,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardViewModel {
    Review {
        depth: usize,
        card: ReviewCardViewModel,
    },
    Filler {
        depth: usize,
    },
}

impl CardViewModel {
    pub fn depth(&self) -> usize {
        match self {
            Self::Review { depth, .. } | Self::Filler { depth } => *depth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyViewModel {
    Loading,
    Cards(Vec<CardViewModel>),
    /// Queue exhausted after reviewing at least one item
    CaughtUp { merged: usize, closed: usize },
    /// Nothing to review, nothing reviewed
    Empty,
    LoadFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenViewModel {
    pub header: HeaderViewModel,
    pub body: BodyViewModel,
    pub error: Option<String>,
    pub help: String,
}

impl ScreenViewModel {
    pub fn from_state(state: &ReviewState, user: &str, help: String) -> Self {
        let counters = state.counters;
        let header = HeaderViewModel {
            user: user.to_string(),
            source: state
                .source
                .as_ref()
                .map(|s| s.to_string())
                .unwrap_or_default(),
            progress: format!("{}/{}", counters.reviewed, state.total_count()),
            merged: counters.merged,
            closed: counters.closed,
        };

        let body = match state.phase() {
            QueuePhase::Loading => BodyViewModel::Loading,
            QueuePhase::Failed => BodyViewModel::LoadFailed,
            QueuePhase::Empty if counters.reviewed > 0 => BodyViewModel::CaughtUp {
                merged: counters.merged,
                closed: counters.closed,
            },
            QueuePhase::Empty => BodyViewModel::Empty,
            QueuePhase::Ready => BodyViewModel::Cards(
                state
                    .visible_deck()
                    .iter()
                    .map(|entry| match entry.payload {
                        EntryPayload::Review(item) => CardViewModel::Review {
                            depth: entry.depth,
                            card: ReviewCardViewModel::from_item(item),
                        },
                        EntryPayload::Filler(_) => CardViewModel::Filler { depth: entry.depth },
                    })
                    .collect(),
            ),
        };

        Self {
            header,
            body,
            error: state.current_error_message(),
            help,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use review_deck::reducer::reduce;
    use review_deck::{
        DeckComposer, DeckLayout, Disposition, ItemKey, ReviewAction, ReviewSource, ReviewStats,
    };

    fn item(n: u64) -> ReviewItem {
        let stats = ReviewStats {
            additions: 12,
            deletions: 3,
            changed_files: 4,
            commits: 2,
            comments: 1,
            age_days: 6,
            labels: vec!["bug".to_string()],
            ..ReviewStats::default()
        };
        ReviewItem::with_details(
            ItemKey::new("octo/app", n),
            format!("Fix {}", n),
            review_deck::ReviewAuthor::new("alice"),
            stats,
        )
    }

    fn loaded(count: u64) -> ReviewState {
        let items: Vec<ReviewItem> = (1..=count).map(item).collect();
        let deck = DeckComposer::seeded(DeckLayout::default(), 2).compose(&items);
        let state = reduce(
            ReviewState::new(3),
            &ReviewAction::Load {
                source: ReviewSource::Repository("octo/app".to_string()),
                request: 1,
            },
        );
        reduce(
            state,
            &ReviewAction::Loaded {
                request: 1,
                items,
                deck,
            },
        )
    }

    #[test]
    fn test_review_card_formatting() {
        let card = ReviewCardViewModel::from_item(&item(7));
        assert_eq!(card.reference, "octo/app#7");
        assert_eq!(card.author, "alice");
        assert_eq!(card.stats, "+12 -3 · 4 files · 2 commits · 1 comments");
        assert_eq!(card.age, "opened 6 days ago");
        assert_eq!(card.labels.as_deref(), Some("bug"));
        assert!(!card.bio_lines.is_empty());
    }

    #[test]
    fn test_ready_screen() {
        let vm = ScreenViewModel::from_state(&loaded(3), "octocat", String::new());
        assert_eq!(vm.header.progress, "0/3");
        assert_eq!(vm.header.source, "octo/app");
        match vm.body {
            BodyViewModel::Cards(cards) => {
                assert_eq!(cards.len(), 3);
                assert_eq!(cards[0].depth(), 0);
                assert!(matches!(&cards[0], CardViewModel::Review { card, .. } if card.reference == "octo/app#1"));
            }
            other => panic!("expected cards, got {:?}", other),
        }
    }

    #[test]
    fn test_caught_up_screen() {
        let mut state = loaded(1);
        state = reduce(
            state,
            &ReviewAction::Dispose {
                key: ItemKey::new("octo/app", 1),
                disposition: Disposition::Merge,
            },
        );
        let vm = ScreenViewModel::from_state(&state, "octocat", String::new());
        assert_eq!(vm.header.progress, "1/1");
        assert_eq!(
            vm.body,
            BodyViewModel::CaughtUp {
                merged: 1,
                closed: 0
            }
        );
    }

    #[test]
    fn test_loading_and_failed_screens() {
        let state = reduce(
            ReviewState::new(3),
            &ReviewAction::Load {
                source: ReviewSource::AllRepositories,
                request: 1,
            },
        );
        let vm = ScreenViewModel::from_state(&state, "octocat", String::new());
        assert_eq!(vm.body, BodyViewModel::Loading);

        let state = reduce(
            state,
            &ReviewAction::LoadFailed {
                request: 1,
                message: "offline".to_string(),
            },
        );
        let vm = ScreenViewModel::from_state(&state, "octocat", String::new());
        assert_eq!(vm.body, BodyViewModel::LoadFailed);
        assert_eq!(
            vm.error.as_deref(),
            Some("Failed to load pull requests: offline")
        );
    }
}
