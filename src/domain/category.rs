use serde::Deserialize;

use crate::domain::change::Change;

pub const EXCLUDE_LABEL: &str = "exclude-from-changelog";
pub const RELEASE_LABEL: &str = "release";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub label: String,
    pub title: String,
}

impl Category {
    pub fn new(label: &str, title: &str) -> Self {
        Self {
            label: label.to_string(),
            title: title.to_string(),
        }
    }
}

/// Label-to-section rules, evaluated top to bottom; order is also render order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable(Vec<Category>);

impl CategoryTable {
    pub fn new(categories: Vec<Category>) -> Self {
        Self(categories)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Places a change in one bucket, or returns `None` when its labels
    /// remove it from the changelog altogether.
    pub fn categorize(&self, change: &Change) -> Option<Bucket> {
        if let Some(metadata) = &change.metadata {
            if metadata.has_label(EXCLUDE_LABEL) || metadata.has_label(RELEASE_LABEL) {
                return None;
            }
        }

        let bucket = self
            .0
            .iter()
            .position(|category| change.labels().any(|label| label == category.label))
            .map(Bucket::Category)
            .unwrap_or(Bucket::Unsorted);
        Some(bucket)
    }

    pub fn default_table() -> Self {
        Self::new(vec![
            Category::new("whiskers", "`whiskers`"),
            Category::new("msvg", "`msvg`"),
            Category::new("vsvg-cli", "`vsvg`"),
            Category::new("vsvg", "vsvg"),
            Category::new("vsvg-viewer", "vsvg"),
            Category::new("common", "Common"),
            Category::new("web-demo", "Web Demos"),
            Category::new("release", "Release"),
        ])
    }
}

/// Destination of a surviving change. `Category` holds the index of the rule
/// in its `CategoryTable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Category(usize),
    Unsorted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commit::CommitRef;
    use crate::domain::pull_request::PrMetadata;

    fn change_with_labels(labels: &[&str]) -> Change {
        Change::new(
            CommitRef {
                id: "abc".to_string(),
                title: "title".to_string(),
                pr_number: Some(1),
            },
            Some(PrMetadata {
                author_handle: "alice".to_string(),
                title: "title".to_string(),
                labels: labels.iter().map(|label| label.to_string()).collect(),
            }),
        )
    }

    fn table() -> CategoryTable {
        CategoryTable::new(vec![
            Category::new("whiskers", "`whiskers`"),
            Category::new("vsvg", "vsvg"),
            Category::new("common", "Common"),
        ])
    }

    #[test]
    fn first_matching_rule_wins() {
        let change = change_with_labels(&["common", "vsvg"]);
        assert_eq!(table().categorize(&change), Some(Bucket::Category(1)));
    }

    #[test]
    fn unmatched_labels_go_to_unsorted() {
        let change = change_with_labels(&["documentation"]);
        assert_eq!(table().categorize(&change), Some(Bucket::Unsorted));
    }

    #[test]
    fn missing_metadata_goes_to_unsorted() {
        let mut change = change_with_labels(&[]);
        change.metadata = None;
        assert_eq!(table().categorize(&change), Some(Bucket::Unsorted));
    }

    #[test]
    fn exclusion_labels_drop_change() {
        for labels in [&["exclude-from-changelog", "vsvg"][..], &["release"][..]] {
            assert_eq!(table().categorize(&change_with_labels(labels)), None);
        }
    }

    #[test]
    fn release_label_drops_change_even_when_listed_as_category() {
        let change = change_with_labels(&["release"]);
        assert_eq!(CategoryTable::default_table().categorize(&change), None);
    }

    #[test]
    fn every_label_set_lands_in_exactly_one_bucket() {
        let table = table();
        let pool = ["whiskers", "vsvg", "common", "other", "misc"];
        for mask in 0u32..(1 << pool.len()) {
            let labels: Vec<&str> = pool
                .iter()
                .enumerate()
                .filter(|(index, _)| mask & (1 << index) != 0)
                .map(|(_, label)| *label)
                .collect();
            let bucket = table.categorize(&change_with_labels(&labels));
            let expected = table
                .iter()
                .position(|category| labels.contains(&category.label.as_str()))
                .map(Bucket::Category)
                .unwrap_or(Bucket::Unsorted);
            assert_eq!(bucket, Some(expected), "labels: {labels:?}");
        }
    }
}
