use tracing::{debug, info};

use crate::context::AppContext;
use crate::domain::change::Change;
use crate::domain::changelog::{Changelog, ChangelogFormatter};
use crate::domain::commit::CommitRef;
use crate::error::{AppError, AppResult};
use crate::workflow::resolve::resolve_metadata;

pub struct ChangelogOutcome {
    pub rendered: String,
    pub entries: usize,
    pub duplicates: usize,
    pub excluded: usize,
}

/// Builds the changelog for `commit_range`, skipping anything already
/// present in the previous changelog.
pub async fn generate_changelog(
    ctx: &AppContext,
    commit_range: &str,
) -> AppResult<ChangelogOutcome> {
    let config = &ctx.config;

    let previous_changelog = tokio::fs::read_to_string(&config.previous_changelog)
        .await
        .map_err(|source| AppError::PreviousChangelog {
            path: config.previous_changelog.clone(),
            source,
        })?;

    let raw_commits = ctx.version_control.list_commits(commit_range).await?;
    info!(count = raw_commits.len(), range = commit_range, "collected commits");
    let commits: Vec<CommitRef> = raw_commits.iter().map(CommitRef::from).collect();

    let metadata = resolve_metadata(
        ctx.code_review.as_ref(),
        &commits,
        config.max_parallel_lookups,
    )
    .await;

    let mut changelog = Changelog::new(&config.categories);
    let mut duplicates = 0;
    let mut excluded = 0;

    for (commit, metadata) in commits.into_iter().zip(metadata) {
        let change = Change::new(commit, metadata);
        if change.is_recorded_in(&previous_changelog) {
            info!(
                commit = %change.commit.id,
                pr = ?change.commit.pr_number,
                "ignoring duplicate: {}",
                change.commit.title
            );
            duplicates += 1;
            continue;
        }

        match config.categories.categorize(&change) {
            Some(bucket) => changelog.push(bucket, change),
            None => {
                debug!(commit = %change.commit.id, "excluded by label");
                excluded += 1;
            }
        }
    }

    if changelog.is_empty() {
        info!("no new changes since the previous changelog");
    }

    let links = config.links();
    let formatter = ChangelogFormatter {
        links: &links,
        categories: &config.categories,
        official_contributors: &config.official_contributors,
    };

    Ok(ChangelogOutcome {
        rendered: formatter.render(&changelog, commit_range),
        entries: changelog.len(),
        duplicates,
        excluded,
    })
}
