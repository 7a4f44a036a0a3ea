use tracing::info;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::changelog::{ChangelogOutcome, generate_changelog};

#[derive(Debug, Clone)]
pub struct ChangelogCommandArgs {
    pub commit_range: String,
}

pub async fn run(ctx: &AppContext, args: ChangelogCommandArgs) -> AppResult<ChangelogOutcome> {
    let outcome = generate_changelog(ctx, &args.commit_range).await?;
    info!(
        entries = outcome.entries,
        duplicates = outcome.duplicates,
        excluded = outcome.excluded,
        "changelog ready"
    );
    Ok(outcome)
}
