//! Review deck core
//!
//! The state machine behind swiping through pull requests: a gesture
//! classifier, a deck composer that interleaves filler cards, and a
//! Redux-style store that owns the pending queue, counters and undo
//! history.
//!
//! # Architecture
//!
//! ```text
//!  trigger ──► ReviewStore::dispatch
//!                  │
//!                  ▼
//!          middleware chain ──spawn──► ReviewGateway (runtime)
//!                  │                         │
//!                  ▼                         │ completion action
//!               reduce ◄──── Dispatcher ◄────┘
//!                  │
//!                  ▼
//!      error expiry + listeners
//! ```
//!
//! Dispositions are optimistic: the queue changes immediately and a
//! failing remote call only raises the error signal.

pub mod actions;
pub mod deck;
pub mod dispatcher;
pub mod domain_models;
pub mod error;
pub mod expiry;
pub mod gateway;
pub mod gesture;
pub mod middleware;
pub mod reducer;
pub mod state;
pub mod store;

pub use actions::ReviewAction;
pub use deck::{Deck, DeckComposer, DeckEntry, DeckLayout, FillerKey};
pub use dispatcher::Dispatcher;
pub use domain_models::{
    Counters, Disposition, HistoryEntry, ItemKey, ReviewAuthor, ReviewItem, ReviewSource,
    ReviewStats,
};
pub use error::{GatewayError, ReviewError};
pub use gateway::{GitHubGateway, ReviewGateway};
pub use gesture::{GestureOutcome, GestureThresholds, SwipeDirection};
pub use state::{EntryKind, EntryPayload, ErrorSignal, QueuePhase, ReviewState, VisibleEntry};
pub use store::{DragResponse, ReviewStore, StoreSettings};
