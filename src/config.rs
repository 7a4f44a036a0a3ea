use std::env;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;

use serde::Deserialize;

use crate::domain::category::{Category, CategoryTable};
use crate::domain::changelog::RepoLinks;
use crate::error::{AppError, AppResult};

pub const CONFIG_FILE_NAME: &str = "prlog.toml";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub owner: String,
    pub repo: String,
    pub official_contributors: Vec<String>,
    pub categories: CategoryTable,
    pub previous_changelog: PathBuf,
    pub web_base_url: String,
    pub api_base_url: String,
    pub pr_source: PrSource,
    pub github_token: Option<String>,
    pub max_parallel_lookups: NonZeroUsize,
    pub workspace_root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrSource {
    /// `gh pr view` subprocess.
    Gh,
    /// GitHub REST API.
    Api,
    Custom(String),
}

impl PrSource {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "gh" => PrSource::Gh,
            "api" => PrSource::Api,
            other => PrSource::Custom(other.to_string()),
        }
    }
}

/// On-disk shape of `prlog.toml`; every key is optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    owner: Option<String>,
    repo: Option<String>,
    official_contributors: Option<Vec<String>>,
    categories: Option<Vec<Category>>,
    previous_changelog: Option<PathBuf>,
    web_base_url: Option<String>,
    api_base_url: Option<String>,
    pr_source: Option<String>,
    max_parallel_lookups: Option<usize>,
}

impl AppConfig {
    pub fn load(workspace_hint: &Path) -> AppResult<Self> {
        let file = read_config_file(&workspace_hint.join(CONFIG_FILE_NAME))?;
        Self::from_sources(workspace_hint, file, |key| env::var(key).ok())
    }

    fn from_sources(
        workspace_hint: &Path,
        file: ConfigFile,
        env_var: impl Fn(&str) -> Option<String>,
    ) -> AppResult<Self> {
        let pr_source = env_var("PRLOG_PR_SOURCE")
            .or(file.pr_source)
            .map(|source| PrSource::parse(&source))
            .unwrap_or(PrSource::Gh);

        let github_token = env_var("GITHUB_TOKEN")
            .or_else(|| env_var("GH_TOKEN"))
            .filter(|token| !token.trim().is_empty());

        let max_parallel_lookups = match env_var("PRLOG_MAX_PARALLEL") {
            Some(raw) => Some(raw.trim().parse::<usize>().map_err(|err| {
                AppError::Configuration(format!("invalid PRLOG_MAX_PARALLEL '{raw}': {err}"))
            })?),
            None => file.max_parallel_lookups,
        };
        let max_parallel_lookups = match max_parallel_lookups {
            Some(limit) => NonZeroUsize::new(limit).ok_or_else(|| {
                AppError::Configuration("max_parallel_lookups must be at least 1".to_string())
            })?,
            None => thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        };

        let categories = match file.categories {
            Some(categories) => {
                if let Some(category) = categories.iter().find(|c| c.label.trim().is_empty()) {
                    return Err(AppError::Configuration(format!(
                        "category '{}' has an empty label",
                        category.title
                    )));
                }
                CategoryTable::new(categories)
            }
            None => CategoryTable::default_table(),
        };

        Ok(Self {
            owner: file.owner.unwrap_or_else(|| "abey79".to_string()),
            repo: file.repo.unwrap_or_else(|| "vsvg".to_string()),
            official_contributors: file
                .official_contributors
                .unwrap_or_else(|| vec!["abey79".to_string()]),
            categories,
            previous_changelog: workspace_hint.join(
                file.previous_changelog
                    .unwrap_or_else(|| PathBuf::from("CHANGELOG.md")),
            ),
            web_base_url: file
                .web_base_url
                .unwrap_or_else(|| "https://github.com".to_string()),
            api_base_url: file
                .api_base_url
                .unwrap_or_else(|| "https://api.github.com".to_string()),
            pr_source,
            github_token,
            max_parallel_lookups,
            workspace_root: workspace_hint.to_path_buf(),
        })
    }

    pub fn links(&self) -> RepoLinks {
        RepoLinks {
            web_base_url: self.web_base_url.clone(),
            owner: self.owner.clone(),
            repo: self.repo.clone(),
        }
    }
}

fn read_config_file(path: &Path) -> AppResult<ConfigFile> {
    match fs::read_to_string(path) {
        Ok(contents) => toml::from_str::<ConfigFile>(&contents).map_err(|err| {
            AppError::Configuration(format!("invalid config file {}: {err}", path.display()))
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(err) => Err(AppError::Io(err)),
    }
}
