use crate::domain::commit::CommitRef;
use crate::domain::pull_request::PrMetadata;

#[derive(Debug, Clone)]
pub struct Change {
    pub commit: CommitRef,
    pub metadata: Option<PrMetadata>,
}

impl Change {
    pub fn new(commit: CommitRef, metadata: Option<PrMetadata>) -> Self {
        Self { commit, metadata }
    }

    /// Marker a rendered changelog carries for this change: `[#N]` for PRs,
    /// `[<full commit id>]` otherwise.
    pub fn dedup_marker(&self) -> String {
        match self.commit.pr_number {
            Some(number) => format!("[#{number}]"),
            None => format!("[{}]", self.commit.id),
        }
    }

    /// Literal substring test against a previously published changelog.
    pub fn is_recorded_in(&self, previous_changelog: &str) -> bool {
        previous_changelog.contains(&self.dedup_marker())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.metadata
            .iter()
            .flat_map(|metadata| metadata.labels.iter().map(String::as_str))
    }
}
