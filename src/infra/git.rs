use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::commit::RawCommit;
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

const FIELD_SEPARATOR: char = '\u{1f}';

pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn list_commits(&self, range: &str) -> AppResult<Vec<RawCommit>> {
        if range.trim().is_empty() {
            return Err(AppError::VersionControl(
                "commit range must not be empty".to_string(),
            ));
        }
        if range.starts_with('-') {
            return Err(AppError::VersionControl(format!(
                "invalid commit range '{range}': must not start with '-'"
            )));
        }

        debug!(range, root = %self.workspace_root.display(), "listing commits");
        let output = Command::new("git")
            .arg("log")
            .arg("--reverse")
            .arg("--format=%H%x1f%s")
            .arg(range)
            .arg("--")
            .current_dir(&self.workspace_root)
            .output()
            .await
            .map_err(|err| AppError::VersionControl(format!("failed to run git: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::VersionControl(format!(
                "`git log {range}` failed with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        parse_log(&String::from_utf8_lossy(&output.stdout))
    }
}

fn parse_log(stdout: &str) -> AppResult<Vec<RawCommit>> {
    stdout
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (id, summary) = line.split_once(FIELD_SEPARATOR).ok_or_else(|| {
                AppError::VersionControl(format!("unexpected `git log` line: {line}"))
            })?;
            Ok(RawCommit {
                id: id.to_string(),
                summary: summary.to_string(),
            })
        })
        .collect()
}
