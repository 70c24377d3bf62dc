//! Review store state
//!
//! The store is the single writer of this state. Invariants kept by the
//! reducer after every action:
//! - no two queued items share a key
//! - `counters.reviewed == counters.merged + counters.closed == history.len()`
//! - the deck holds exactly one review entry per queued item, in queue order

use crate::deck::{Deck, DeckEntry, FillerKey};
use crate::domain_models::{Counters, HistoryEntry, ItemKey, ReviewItem, ReviewSource};
use crate::error::ReviewError;
use chrono::{DateTime, Utc};

/// The latest error shown to the reviewer
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorSignal {
    pub error: ReviewError,
    /// Increases with every raised error; expiry timers compare against it
    pub generation: u64,
    pub raised_at: DateTime<Utc>,
}

/// Coarse lifecycle of the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueuePhase {
    Empty,
    Loading,
    Ready,
    /// Empty because the last load failed
    Failed,
}

#[derive(Debug, Clone)]
pub struct ReviewState {
    pub source: Option<ReviewSource>,
    pub queue: Vec<ReviewItem>,
    pub history: Vec<HistoryEntry>,
    pub counters: Counters,
    pub deck: Deck,
    pub loading: bool,
    /// Request id of the load in flight; completions of older loads are dropped
    pub pending_load: Option<u64>,
    pub error: Option<ErrorSignal>,
    pub error_generation: u64,
}

impl ReviewState {
    pub fn new(visible_cards: usize) -> Self {
        Self {
            source: None,
            queue: Vec::new(),
            history: Vec::new(),
            counters: Counters::default(),
            deck: Deck::empty(visible_cards),
            loading: false,
            pending_load: None,
            error: None,
            error_generation: 0,
        }
    }

    /// Replace the error signal with a newer one
    pub fn raise(&mut self, error: ReviewError) {
        self.error_generation += 1;
        self.error = Some(ErrorSignal {
            error,
            generation: self.error_generation,
            raised_at: Utc::now(),
        });
    }

    pub fn phase(&self) -> QueuePhase {
        if self.loading {
            QueuePhase::Loading
        } else if !self.queue.is_empty() {
            QueuePhase::Ready
        } else if self.error.as_ref().is_some_and(|e| e.error.is_load()) {
            QueuePhase::Failed
        } else {
            QueuePhase::Empty
        }
    }

    /// Head of the queue
    pub fn current(&self) -> Option<&ReviewItem> {
        self.queue.first()
    }

    pub fn find(&self, key: &ItemKey) -> Option<&ReviewItem> {
        self.queue.iter().find(|item| &item.key == key)
    }

    pub fn contains(&self, key: &ItemKey) -> bool {
        self.find(key).is_some()
    }

    /// Reviewed so far plus what is left
    pub fn total_count(&self) -> usize {
        self.counters.reviewed + self.queue.len()
    }

    pub fn current_error_message(&self) -> Option<String> {
        self.error.as_ref().map(|signal| signal.error.to_string())
    }

    /// The visible window, resolved against the queue
    pub fn visible_deck(&self) -> Vec<VisibleEntry<'_>> {
        self.deck
            .visible()
            .iter()
            .enumerate()
            .filter_map(|(depth, entry)| {
                let payload = match entry {
                    DeckEntry::Review(key) => EntryPayload::Review(self.find(key)?),
                    DeckEntry::Filler(key) => EntryPayload::Filler(*key),
                };
                Some(VisibleEntry {
                    key: entry.render_key(),
                    depth,
                    payload,
                })
            })
            .collect()
    }
}

/// Kind tag of a visible card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Review,
    Filler,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryPayload<'a> {
    Review(&'a ReviewItem),
    Filler(FillerKey),
}

/// A card handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleEntry<'a> {
    /// Stable render key (`pr-{repo}-{number}` or `ad-{n}`)
    pub key: String,
    /// 0 for the top card
    pub depth: usize,
    pub payload: EntryPayload<'a>,
}

impl VisibleEntry<'_> {
    pub fn kind(&self) -> EntryKind {
        match self.payload {
            EntryPayload::Review(_) => EntryKind::Review,
            EntryPayload::Filler(_) => EntryKind::Filler,
        }
    }

    /// Only the top card reacts to gestures
    pub fn is_interactive(&self) -> bool {
        self.depth == 0
    }
}
