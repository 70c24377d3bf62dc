//! Remote disposition gateway
//!
//! The store's only view of the remote service: list the items to review
//! and apply a disposition to one of them. Both calls may fail
//! independently of local state.

use crate::domain_models::{Disposition, ReviewItem, ReviewSource};
use crate::error::GatewayError;
use async_trait::async_trait;

pub mod github;
#[cfg(test)]
pub mod scripted;

pub use github::GitHubGateway;

#[async_trait]
pub trait ReviewGateway: Send + Sync {
    /// Fetch every reviewable item for `source`, in review order
    async fn list_review_items(
        &self,
        source: &ReviewSource,
    ) -> Result<Vec<ReviewItem>, GatewayError>;

    /// Merge or close `item` on the remote
    ///
    /// Timeouts are reported as errors like any other failure.
    async fn apply_disposition(
        &self,
        item: &ReviewItem,
        disposition: Disposition,
    ) -> Result<(), GatewayError>;
}
