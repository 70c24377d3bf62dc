//! Actions flowing through the review store
//!
//! Trigger actions come from the presentation layer; completion actions
//! are dispatched by middleware once a remote call returns.

use crate::deck::{Deck, FillerKey};
use crate::domain_models::{Disposition, ItemKey, ReviewItem, ReviewSource};

#[derive(Debug, Clone)]
pub enum ReviewAction {
    /// Fetch a fresh listing; `request` identifies this load
    Load { source: ReviewSource, request: u64 },
    /// The listing arrived, deck not composed yet
    Fetched { request: u64, items: Vec<ReviewItem> },
    /// Deduplicated listing plus its composed deck
    Loaded {
        request: u64,
        items: Vec<ReviewItem>,
        deck: Deck,
    },
    LoadFailed { request: u64, message: String },

    /// Remove the item locally and apply the disposition remotely
    Dispose {
        key: ItemKey,
        disposition: Disposition,
    },
    DispositionSucceeded {
        key: ItemKey,
        disposition: Disposition,
    },
    DispositionFailed {
        key: ItemKey,
        disposition: Disposition,
        reason: String,
    },

    Undo,
    DismissFiller(FillerKey),

    ClearError,
    /// Display timeout for the error raised with `generation` elapsed
    ErrorExpired { generation: u64 },
}

impl ReviewAction {
    /// Short name for log lines
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load { .. } => "Load",
            Self::Fetched { .. } => "Fetched",
            Self::Loaded { .. } => "Loaded",
            Self::LoadFailed { .. } => "LoadFailed",
            Self::Dispose { .. } => "Dispose",
            Self::DispositionSucceeded { .. } => "DispositionSucceeded",
            Self::DispositionFailed { .. } => "DispositionFailed",
            Self::Undo => "Undo",
            Self::DismissFiller(_) => "DismissFiller",
            Self::ClearError => "ClearError",
            Self::ErrorExpired { .. } => "ErrorExpired",
        }
    }

    /// One-line description without item payloads
    pub fn summary(&self) -> String {
        match self {
            Self::Load { source, request } => format!("Load #{} from {}", request, source),
            Self::Fetched { request, items } => {
                format!("Fetched #{}: {} item(s)", request, items.len())
            }
            Self::Loaded { request, items, deck } => format!(
                "Loaded #{}: {} item(s), {} card(s)",
                request,
                items.len(),
                deck.len()
            ),
            Self::LoadFailed { request, message } => {
                format!("LoadFailed #{}: {}", request, message)
            }
            Self::Dispose { key, disposition } => format!("Dispose {} ({})", key, disposition),
            Self::DispositionSucceeded { key, disposition } => {
                format!("DispositionSucceeded {} ({})", key, disposition)
            }
            Self::DispositionFailed {
                key,
                disposition,
                reason,
            } => format!("DispositionFailed {} ({}): {}", key, disposition, reason),
            Self::DismissFiller(key) => format!("DismissFiller {}", key.render_key()),
            Self::ErrorExpired { generation } => format!("ErrorExpired #{}", generation),
            Self::Undo | Self::ClearError => self.name().to_string(),
        }
    }
}
