use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrMetadata {
    pub author_handle: String,
    pub title: String,
    pub labels: BTreeSet<String>,
}

impl PrMetadata {
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }
}
