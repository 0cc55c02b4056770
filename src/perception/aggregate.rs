use std::collections::BTreeMap;

/// A phrase plus how many times it was seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counted {
    pub label: String,
    pub count: u32,
}

impl Counted {
    pub fn new(label: impl Into<String>, count: u32) -> Self {
        Self { label: label.into(), count }
    }
}

/// Collapses repeated labels into (label, count) pairs, sorted ascending by label.
/// Returns the pairs and the total, which always equals `labels.len()`.
pub fn aggregate<S: AsRef<str>>(labels: &[S]) -> (Vec<Counted>, u32) {
    let mut groups: BTreeMap<&str, u32> = BTreeMap::new();
    for label in labels {
        *groups.entry(label.as_ref()).or_insert(0) += 1;
    }

    let total = groups.values().sum();
    let pairs = groups
        .into_iter()
        .map(|(label, count)| Counted::new(label, count))
        .collect();
    (pairs, total)
}
