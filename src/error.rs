use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("version control error: {0}")]
    VersionControl(String),
    #[error("code review error: {0}")]
    CodeReview(String),
    #[error("pull request #{0} not found")]
    PullRequestNotFound(u64),
    #[error("failed to read previous changelog {}: {source}", .path.display())]
    PreviousChangelog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
