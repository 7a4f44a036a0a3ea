use async_trait::async_trait;

use crate::domain::commit::RawCommit;
use crate::error::AppResult;

#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Commits selected by `range` (e.g. `v0.1.0..HEAD`), oldest first.
    async fn list_commits(&self, range: &str) -> AppResult<Vec<RawCommit>>;
}
