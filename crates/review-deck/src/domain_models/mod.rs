//! Domain models
//!
//! Plain data types shared by the deck composer, the store and the
//! gateway. Nothing here performs I/O.

pub mod history;
pub mod insights;
pub mod review_item;

pub use history::{Counters, HistoryEntry};
pub use insights::{compatibility_score, generate_bio};
pub use review_item::{
    dedup_items, split_repository, Disposition, ItemKey, ReviewAuthor, ReviewItem, ReviewSource,
    ReviewStats,
};
