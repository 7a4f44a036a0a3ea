mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::cmd::changelog::{self, ChangelogCommandArgs};
use crate::config::{AppConfig, PrSource};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::gh::GhCli;
use crate::infra::git::GitCli;
use crate::infra::github::GitHubClient;
use crate::services::CodeReviewService;

#[derive(Parser)]
#[command(
    name = "prlog",
    author,
    version,
    about = "Summarize merged pull requests into a changelog"
)]
struct Cli {
    /// Commits to summarize, e.g. `v0.11.0..HEAD`.
    #[arg(long, value_name = "RANGE")]
    commit_range: String,
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;
    let config = AppConfig::load(&cwd)?;

    let code_review: Arc<dyn CodeReviewService> = match &config.pr_source {
        PrSource::Gh => Arc::new(gh_cli(&config)),
        PrSource::Api => {
            if config.github_token.is_none() {
                warn!("GITHUB_TOKEN not set; GitHub API requests are unauthenticated.");
            }
            Arc::new(GitHubClient::new(
                config.api_base_url.clone(),
                config.owner.clone(),
                config.repo.clone(),
                config.github_token.clone(),
            ))
        }
        PrSource::Custom(source) => {
            warn!("unknown PR source '{source}', falling back to the gh CLI.");
            Arc::new(gh_cli(&config))
        }
    };
    let git = Arc::new(GitCli::new(config.workspace_root.clone()));

    let context = AppContext::new(config, git, code_review);

    let outcome = changelog::run(
        &context,
        ChangelogCommandArgs {
            commit_range: cli.commit_range,
        },
    )
    .await?;

    print!("{}", outcome.rendered);

    Ok(())
}

fn gh_cli(config: &AppConfig) -> GhCli {
    GhCli::new(
        config.workspace_root.clone(),
        config.owner.clone(),
        config.repo.clone(),
    )
}
