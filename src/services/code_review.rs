use async_trait::async_trait;

use crate::domain::pull_request::PrMetadata;
use crate::error::AppResult;

#[async_trait]
pub trait CodeReviewService: Send + Sync {
    /// Looks up one pull request. A missing PR is an error, not `None`.
    async fn fetch_pull_request(&self, number: u64) -> AppResult<PrMetadata>;
}
