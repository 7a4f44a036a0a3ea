use std::num::NonZeroUsize;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::domain::commit::CommitRef;
use crate::domain::pull_request::PrMetadata;
use crate::error::AppError;
use crate::services::CodeReviewService;

/// Fetches metadata for every commit carrying a PR number, at most
/// `max_parallel` lookups in flight.
///
/// The returned vector is index-aligned with `commits`. Commits without a PR
/// number, and lookups that fail, yield `None`; failures are logged and never
/// abort the batch.
pub async fn resolve_metadata(
    code_review: &dyn CodeReviewService,
    commits: &[CommitRef],
    max_parallel: NonZeroUsize,
) -> Vec<Option<PrMetadata>> {
    let mut resolved: Vec<Option<PrMetadata>> = vec![None; commits.len()];

    let lookups: Vec<(usize, u64)> = commits
        .iter()
        .enumerate()
        .filter_map(|(index, commit)| commit.pr_number.map(|number| (index, number)))
        .collect();
    if lookups.is_empty() {
        return resolved;
    }

    info!(
        count = lookups.len(),
        parallelism = max_parallel.get(),
        "fetching pull request metadata"
    );

    let mut results = stream::iter(lookups)
        .map(|(index, number)| async move {
            (index, number, code_review.fetch_pull_request(number).await)
        })
        .buffer_unordered(max_parallel.get());

    while let Some((index, number, result)) = results.next().await {
        match result {
            Ok(metadata) => {
                debug!(pr = number, "resolved pull request");
                resolved[index] = Some(metadata);
            }
            Err(AppError::PullRequestNotFound(_)) => {
                warn!(pr = number, "PR #{number} not found");
            }
            Err(err) => {
                warn!(pr = number, "PR #{number} lookup failed: {err}");
            }
        }
    }

    resolved
}
