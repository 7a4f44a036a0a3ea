use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::domain::pull_request::PrMetadata;
use crate::error::{AppError, AppResult};
use crate::services::CodeReviewService;

/// Pull request lookups through the GitHub CLI (`gh pr view`).
pub struct GhCli {
    workspace_root: PathBuf,
    owner: String,
    repo: String,
}

impl GhCli {
    pub fn new(workspace_root: PathBuf, owner: String, repo: String) -> Self {
        Self {
            workspace_root,
            owner,
            repo,
        }
    }
}

#[async_trait]
impl CodeReviewService for GhCli {
    async fn fetch_pull_request(&self, number: u64) -> AppResult<PrMetadata> {
        let repo = format!("{}/{}", self.owner, self.repo);
        let number_arg = number.to_string();
        debug!(pr = number, repo = %repo, "running gh pr view");

        let output = Command::new("gh")
            .args(["pr", "view", "--repo", repo.as_str(), number_arg.as_str()])
            .args(["--json", "title,author,labels"])
            .current_dir(&self.workspace_root)
            .output()
            .await
            .map_err(|err| AppError::CodeReview(format!("failed to run gh: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(number, &output.status.to_string(), &stderr));
        }

        parse_view(&output.stdout)
    }
}

fn classify_failure(number: u64, status: &str, stderr: &str) -> AppError {
    if stderr.contains("Could not resolve to a PullRequest") {
        return AppError::PullRequestNotFound(number);
    }
    AppError::CodeReview(format!(
        "`gh pr view {number}` failed with {status}: {}",
        stderr.trim()
    ))
}

fn parse_view(stdout: &[u8]) -> AppResult<PrMetadata> {
    let view: GhPrView = serde_json::from_slice(stdout)
        .map_err(|err| AppError::CodeReview(format!("failed to parse gh output: {err}")))?;

    Ok(PrMetadata {
        author_handle: view.author.login,
        title: view.title,
        labels: view.labels.into_iter().map(|label| label.name).collect(),
    })
}

#[derive(Deserialize)]
struct GhPrView {
    title: String,
    author: GhAuthor,
    #[serde(default)]
    labels: Vec<GhLabel>,
}

#[derive(Deserialize)]
struct GhAuthor {
    login: String,
}

#[derive(Deserialize)]
struct GhLabel {
    name: String,
}
