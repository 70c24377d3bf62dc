//! Deck composition
//!
//! Builds the render-ordered list of cards from a freshly loaded queue,
//! interleaving at most one filler card per group of reviewable items.
//! Placement runs once per load; afterwards entries are only removed (or,
//! on undo, restored at the front), so fillers never jump mid-session.

use crate::domain_models::{ItemKey, ReviewItem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use swipe_config::DeckConfig;

/// Identity of a filler card, unique within one composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FillerKey(pub u32);

impl FillerKey {
    pub fn render_key(&self) -> String {
        format!("ad-{}", self.0)
    }
}

/// One card in render order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckEntry {
    Review(ItemKey),
    Filler(FillerKey),
}

impl DeckEntry {
    /// Stable key for the rendering layer
    pub fn render_key(&self) -> String {
        match self {
            Self::Review(key) => key.render_key(),
            Self::Filler(key) => key.render_key(),
        }
    }

    pub fn review_key(&self) -> Option<&ItemKey> {
        match self {
            Self::Review(key) => Some(key),
            Self::Filler(_) => None,
        }
    }

    pub fn is_filler(&self) -> bool {
        matches!(self, Self::Filler(_))
    }
}

/// Group size and visible window of a deck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckLayout {
    /// Maximum reviewable items sharing one filler
    pub group_size: usize,
    /// Number of entries exposed to the front end
    pub visible: usize,
}

impl Default for DeckLayout {
    fn default() -> Self {
        Self::from(&DeckConfig::default())
    }
}

impl From<&DeckConfig> for DeckLayout {
    fn from(config: &DeckConfig) -> Self {
        Self {
            group_size: config.group_size.max(1),
            visible: config.visible_cards,
        }
    }
}

/// Render-ordered cards of one load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    entries: Vec<DeckEntry>,
    visible: usize,
}

impl Deck {
    pub fn empty(visible: usize) -> Self {
        Self {
            entries: Vec::new(),
            visible,
        }
    }

    pub fn entries(&self) -> &[DeckEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first K entries; only these are handed to the renderer
    pub fn visible(&self) -> &[DeckEntry] {
        let end = self.visible.min(self.entries.len());
        &self.entries[..end]
    }

    /// The only interactive entry
    pub fn top(&self) -> Option<&DeckEntry> {
        self.entries.first()
    }

    pub fn filler_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_filler()).count()
    }

    /// Drop the card of a disposed item; returns whether it was present
    pub fn remove_review(&mut self, key: &ItemKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.review_key() != Some(key));
        self.entries.len() != before
    }

    /// Drop a dismissed filler card; returns whether it was present
    pub fn remove_filler(&mut self, key: FillerKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| *entry != DeckEntry::Filler(key));
        self.entries.len() != before
    }

    /// Drop every entry, keeping the window size
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Put an undone item back on top
    pub fn restore_review(&mut self, key: ItemKey) {
        self.remove_review(&key);
        self.entries.insert(0, DeckEntry::Review(key));
    }
}

/// Composes decks using an injected random source
pub struct DeckComposer<R: Rng> {
    rng: R,
    layout: DeckLayout,
}

impl DeckComposer<StdRng> {
    /// Composer seeded from the OS entropy source
    pub fn from_entropy(layout: DeckLayout) -> Self {
        Self::new(StdRng::from_entropy(), layout)
    }

    /// Reproducible composer
    pub fn seeded(layout: DeckLayout, seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), layout)
    }
}

impl<R: Rng> DeckComposer<R> {
    pub fn new(rng: R, layout: DeckLayout) -> Self {
        Self { rng, layout }
    }

    pub fn layout(&self) -> DeckLayout {
        self.layout
    }

    /// Queue indices before which a filler is placed
    ///
    /// One per group of more than one item, picked uniformly from the
    /// group's second through last index. Ascending.
    pub fn filler_positions(&mut self, len: usize) -> Vec<usize> {
        let group_size = self.layout.group_size.max(1);
        let mut positions = Vec::with_capacity(len.div_ceil(group_size));

        for start in (0..len).step_by(group_size) {
            let size = group_size.min(len - start);
            if size > 1 {
                positions.push(start + self.rng.gen_range(1..size));
            }
        }
        positions
    }

    /// Build the deck for a freshly loaded queue
    pub fn compose(&mut self, items: &[ReviewItem]) -> Deck {
        let positions = self.filler_positions(items.len());
        let mut entries = Vec::with_capacity(items.len() + positions.len());
        let mut next_filler = positions.iter().peekable();
        let mut sequence = 0u32;

        for (index, item) in items.iter().enumerate() {
            entries.push(DeckEntry::Review(item.key.clone()));
            if next_filler.peek() == Some(&&(index + 1)) {
                next_filler.next();
                entries.push(DeckEntry::Filler(FillerKey(sequence)));
                sequence += 1;
            }
        }

        log::debug!(
            "Composed deck: {} review entries, {} filler entries",
            items.len(),
            sequence
        );

        Deck {
            entries,
            visible: self.layout.visible,
        }
    }
}
