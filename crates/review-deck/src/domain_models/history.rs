//! Disposition history and counters

use super::{Disposition, ReviewItem};
use serde::{Deserialize, Serialize};

/// One applied disposition, kept so a close can be undone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub item: ReviewItem,
    pub disposition: Disposition,
}

/// Session counters
///
/// `reviewed == merged + closed` always holds; the store also keeps
/// `reviewed` equal to the history length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub reviewed: usize,
    pub merged: usize,
    pub closed: usize,
}

impl Counters {
    /// Count one disposition
    pub fn record(&mut self, disposition: Disposition) {
        self.reviewed += 1;
        match disposition {
            Disposition::Merge => self.merged += 1,
            Disposition::Close => self.closed += 1,
        }
    }

    /// Reverse one disposition, saturating at zero
    pub fn revert(&mut self, disposition: Disposition) {
        self.reviewed = self.reviewed.saturating_sub(1);
        match disposition {
            Disposition::Merge => self.merged = self.merged.saturating_sub(1),
            Disposition::Close => self.closed = self.closed.saturating_sub(1),
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.reviewed == self.merged + self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_revert() {
        let mut counters = Counters::default();
        counters.record(Disposition::Merge);
        counters.record(Disposition::Close);
        counters.record(Disposition::Close);
        assert_eq!(
            counters,
            Counters {
                reviewed: 3,
                merged: 1,
                closed: 2
            }
        );

        counters.revert(Disposition::Close);
        assert_eq!(counters.reviewed, 2);
        assert_eq!(counters.closed, 1);
        assert!(counters.is_consistent());
    }

    #[test]
    fn test_revert_saturates() {
        let mut counters = Counters::default();
        counters.revert(Disposition::Close);
        assert_eq!(counters, Counters::default());
    }
}
