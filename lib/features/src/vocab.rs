use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// A frozen, alphabetically sorted label vocabulary for one multi-label
/// dimension (genres, tags, or categories).
///
/// The vocabulary is discovered once over the full catalog at build time and
/// persisted alongside the feature matrix, so a loaded index and a loaded
/// vocabulary always agree on column meaning. Labels outside the vocabulary
/// are ignored at encode time rather than causing a dimension mismatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vocabulary {
    labels: Vec<String>,
}

impl Vocabulary {
    /// Discover the vocabulary from per-item label sets, keeping only labels
    /// carried by at least `min_support` items.
    pub fn fit<'a, I>(label_sets: I, min_support: usize) -> Self
    where
        I: IntoIterator<Item = &'a BTreeSet<String>>,
    {
        let mut support: HashMap<&str, usize> = HashMap::new();
        for set in label_sets {
            for label in set {
                *support.entry(label.as_str()).or_insert(0) += 1;
            }
        }

        let mut labels: Vec<String> = support
            .into_iter()
            .filter(|(_, count)| *count >= min_support.max(1))
            .map(|(label, _)| label.to_string())
            .collect();
        labels.sort_unstable();
        Self { labels }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Column index of a label, if it is in the vocabulary.
    #[inline]
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.binary_search_by(|l| l.as_str().cmp(label)).ok()
    }

    /// Encode a label set as a binary indicator row over this vocabulary.
    /// Unknown labels are ignored.
    pub fn encode(&self, labels: &BTreeSet<String>) -> Vec<f32> {
        let mut row = vec![0.0; self.labels.len()];
        for label in labels {
            if let Some(i) = self.position(label) {
                row[i] = 1.0;
            }
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamerec_core::split_labels;

    fn sets(raw: &[&str]) -> Vec<BTreeSet<String>> {
        raw.iter().map(|s| split_labels(s)).collect()
    }

    #[test]
    fn test_fit_is_alphabetical() {
        let sets = sets(&["Indie;Action", "Puzzle;Action"]);
        let vocab = Vocabulary::fit(sets.iter(), 1);
        assert_eq!(vocab.labels(), &["Action", "Indie", "Puzzle"]);
    }

    #[test]
    fn test_min_support_prunes() {
        let sets = sets(&["Roguelike;Action", "Action", "Action"]);
        let vocab = Vocabulary::fit(sets.iter(), 2);
        assert_eq!(vocab.labels(), &["Action"]);
    }

    #[test]
    fn test_encode_known_and_unknown() {
        let sets = sets(&["Action;Indie", "Puzzle"]);
        let vocab = Vocabulary::fit(sets.iter(), 1);

        let row = vocab.encode(&split_labels("Indie;Horror"));
        assert_eq!(row, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_encode_empty_set() {
        let sets = sets(&["Action"]);
        let vocab = Vocabulary::fit(sets.iter(), 1);
        assert_eq!(vocab.encode(&BTreeSet::new()), vec![0.0]);
    }

    #[test]
    fn test_fit_deterministic() {
        let a = sets(&["Indie;Action;Strategy", "Puzzle;Action"]);
        let v1 = Vocabulary::fit(a.iter(), 1);
        let v2 = Vocabulary::fit(a.iter(), 1);
        assert_eq!(v1, v2);
    }
}
