use std::sync::LazyLock;

use regex::Regex;

static PR_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(.*) \(#(\d+)\)$").expect("valid PR suffix pattern"));

/// One commit as handed over by the version control collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommit {
    pub id: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    pub id: String,
    pub title: String,
    pub pr_number: Option<u64>,
}

impl CommitRef {
    /// Splits a `Title (#123)` summary into its title and PR number.
    ///
    /// Summaries without the suffix, or whose number does not fit a `u64`,
    /// keep the whole summary as title and carry no PR number.
    pub fn parse(id: &str, summary: &str) -> Self {
        let parsed = PR_SUFFIX.captures(summary).and_then(|captures| {
            let number = captures[2].parse::<u64>().ok()?;
            Some((captures[1].trim().to_string(), number))
        });

        match parsed {
            Some((title, number)) => Self {
                id: id.to_string(),
                title,
                pr_number: Some(number),
            },
            None => Self {
                id: id.to_string(),
                title: summary.to_string(),
                pr_number: None,
            },
        }
    }
}

impl From<&RawCommit> for CommitRef {
    fn from(commit: &RawCommit) -> Self {
        Self::parse(&commit.id, &commit.summary)
    }
}
