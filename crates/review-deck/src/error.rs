//! Error types
//!
//! `ReviewError` is what the store shows to the reviewer; none of its
//! variants ever propagates out of the store. `GatewayError` is what the
//! remote collaborator reports back.

use crate::domain_models::{Disposition, ItemKey};
use thiserror::Error;

/// Errors surfaced through the store's single error signal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    /// The listing fetch failed; the queue is empty until the next load
    #[error("Failed to load pull requests: {0}")]
    Load(String),

    /// A remote merge/close failed after the local state already advanced
    #[error("Failed to {disposition} {key}: {reason}")]
    Disposition {
        key: ItemKey,
        disposition: Disposition,
        reason: String,
    },

    /// Undo of a merge was requested
    #[error("Cannot undo a merged pull request ({key})")]
    UndoRefused { key: ItemKey },
}

impl ReviewError {
    /// Whether this error came from a failed listing fetch
    pub fn is_load(&self) -> bool {
        matches!(self, ReviewError::Load(_))
    }
}

/// Errors reported by a `ReviewGateway`
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport failure or unexpected API response
    #[error("{0}")]
    Remote(String),

    /// The call did not complete in time
    #[error("request timed out after {0}s")]
    TimedOut(u64),

    /// The viewer may not merge or close pull requests in this repository
    #[error("You don't have permission to merge PRs in {0}")]
    PermissionDenied(String),

    /// A repository identifier that is not `owner/repo`
    #[error("invalid repository '{0}', expected owner/repo")]
    InvalidRepository(String),
}

impl From<anyhow::Error> for GatewayError {
    fn from(err: anyhow::Error) -> Self {
        GatewayError::Remote(format!("{:#}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposition_error_names_the_item() {
        let err = ReviewError::Disposition {
            key: ItemKey::new("octo/repo", 7),
            disposition: Disposition::Merge,
            reason: "Base branch was modified".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to merge octo/repo#7: Base branch was modified"
        );
        assert!(!err.is_load());
    }

    #[test]
    fn test_undo_refused_message() {
        let err = ReviewError::UndoRefused {
            key: ItemKey::new("octo/repo", 1),
        };
        assert!(err.to_string().starts_with("Cannot undo a merged pull request"));
    }

    #[test]
    fn test_gateway_error_from_anyhow_keeps_context() {
        let err = anyhow::anyhow!("connection reset").context("GET /user/repos");
        let gateway: GatewayError = err.into();
        assert_eq!(gateway.to_string(), "GET /user/repos: connection reset");
    }
}
