//! Gesture classification
//!
//! Turns a released drag (signed horizontal offset and release velocity)
//! into a discrete outcome. Thresholds come from configuration because the
//! front end decides the coordinate scale.

use crate::domain_models::Disposition;
use swipe_config::GestureConfig;

/// Magnitude thresholds for a drag to count as a swipe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureThresholds {
    pub offset: f64,
    pub velocity: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self::from(&GestureConfig::default())
    }
}

impl From<&GestureConfig> for GestureThresholds {
    fn from(config: &GestureConfig) -> Self {
        Self {
            offset: config.offset_threshold,
            velocity: config.velocity_threshold,
        }
    }
}

/// Result of classifying a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Below both thresholds; the card springs back
    None,
    DisposeNegative,
    DisposePositive,
}

impl GestureOutcome {
    /// Disposition carried by the outcome, if any
    pub fn disposition(&self) -> Option<Disposition> {
        match self {
            Self::None => None,
            Self::DisposePositive => Some(Disposition::Merge),
            Self::DisposeNegative => Some(Disposition::Close),
        }
    }
}

/// Direction of a completed swipe (keyboard or pointer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    pub fn outcome(&self) -> GestureOutcome {
        match self {
            Self::Right => GestureOutcome::DisposePositive,
            Self::Left => GestureOutcome::DisposeNegative,
        }
    }

    pub fn disposition(&self) -> Disposition {
        match self {
            Self::Right => Disposition::Merge,
            Self::Left => Disposition::Close,
        }
    }
}

impl GestureThresholds {
    /// Classify a released drag on a reviewable card
    ///
    /// Comparisons are strict, so a drag of exactly the threshold is `None`.
    /// The positive direction is checked first.
    pub fn classify(&self, offset: f64, velocity: f64) -> GestureOutcome {
        if offset > self.offset || velocity > self.velocity {
            GestureOutcome::DisposePositive
        } else if offset < -self.offset || velocity < -self.velocity {
            GestureOutcome::DisposeNegative
        } else {
            GestureOutcome::None
        }
    }

    /// Whether a released drag on a filler card dismisses it
    ///
    /// Direction carries no meaning for filler, only magnitude.
    pub fn classify_dismissal(&self, offset: f64, velocity: f64) -> bool {
        offset.abs() > self.offset || velocity.abs() > self.velocity
    }
}
