use crate::domain::category::{Bucket, CategoryTable};
use crate::domain::change::Change;

pub const UNSORTED_HEADING: &str = "!!! UNSORTED !!!";

/// Where rendered links point to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLinks {
    pub web_base_url: String,
    pub owner: String,
    pub repo: String,
}

impl RepoLinks {
    fn base(&self) -> &str {
        self.web_base_url.trim_end_matches('/')
    }

    pub fn pull_request(&self, number: u64) -> String {
        format!("{}/{}/{}/pull/{number}", self.base(), self.owner, self.repo)
    }

    pub fn commit(&self, id: &str) -> String {
        format!("{}/{}/{}/commit/{id}", self.base(), self.owner, self.repo)
    }

    pub fn profile(&self, handle: &str) -> String {
        format!("{}/{handle}", self.base())
    }

    pub fn compare(&self, commit_range: &str) -> String {
        format!(
            "{}/{}/{}/compare/{}",
            self.base(),
            self.owner,
            self.repo,
            commit_range.replace("..", "...")
        )
    }
}

/// Changes grouped per bucket, each group kept in commit order.
#[derive(Debug, Clone)]
pub struct Changelog {
    sections: Vec<Vec<Change>>,
    unsorted: Vec<Change>,
}

impl Changelog {
    pub fn new(categories: &CategoryTable) -> Self {
        Self {
            sections: vec![Vec::new(); categories.len()],
            unsorted: Vec::new(),
        }
    }

    /// Panics if `bucket` was not produced by the table this changelog was
    /// built from.
    pub fn push(&mut self, bucket: Bucket, change: Change) {
        match bucket {
            Bucket::Category(index) => self.sections[index].push(change),
            Bucket::Unsorted => self.unsorted.push(change),
        }
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(Vec::len).sum::<usize>() + self.unsorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn section(&self, index: usize) -> &[Change] {
        self.sections.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn unsorted(&self) -> &[Change] {
        &self.unsorted
    }
}

pub struct ChangelogFormatter<'a> {
    pub links: &'a RepoLinks,
    pub categories: &'a CategoryTable,
    pub official_contributors: &'a [String],
}

impl ChangelogFormatter<'_> {
    pub fn render(&self, changelog: &Changelog, commit_range: &str) -> String {
        let mut out = String::new();

        for (index, category) in self.categories.iter().enumerate() {
            self.write_section(&mut out, &category.title, changelog.section(index));
        }
        self.write_section(&mut out, UNSORTED_HEADING, changelog.unsorted());

        out.push_str(&format!(
            "**Full Changelog**: {}\n",
            self.links.compare(commit_range)
        ));
        out
    }

    fn write_section(&self, out: &mut String, title: &str, changes: &[Change]) {
        if changes.is_empty() {
            return;
        }
        out.push_str(&format!("## {title}\n\n"));
        for change in changes {
            out.push_str(&format!("- {}\n", self.format_change(change)));
        }
        out.push('\n');
    }

    pub fn format_change(&self, change: &Change) -> String {
        let commit = &change.commit;
        let Some(number) = commit.pr_number else {
            return format!(
                "{} [{}]({})",
                commit.title,
                commit.id,
                self.links.commit(&commit.id)
            );
        };

        let title = change
            .metadata
            .as_ref()
            .map(|metadata| metadata.title.as_str())
            .unwrap_or(commit.title.as_str());
        let mut line = format!(
            "{} [#{number}]({})",
            clean_title(title),
            self.links.pull_request(number)
        );

        if let Some(metadata) = &change.metadata {
            let handle = &metadata.author_handle;
            if !self.official_contributors.iter().any(|dev| dev == handle) {
                line.push_str(&format!(
                    " (thanks [@{handle}]({})!)",
                    self.links.profile(handle)
                ));
            }
        }
        line
    }
}

/// PR titles often end with a stray period.
fn clean_title(title: &str) -> &str {
    title.trim().trim_end_matches('.').trim_end()
}
