//! Keyword classification by case-insensitive substring containment

use crate::error::{CvTailorError, Result};
use aho_corasick::AhoCorasick;

/// Maps free text to the labels of a fixed `(substring, label)` table.
///
/// Matching is plain substring containment, ASCII case-insensitive, with
/// overlapping matches so every entry is considered. Results always follow the
/// declaration order of the table, never the position of a match in the text.
pub struct KeywordClassifier<L> {
    matcher: AhoCorasick,
    labels: Vec<L>,
}

impl<L: Clone + PartialEq> KeywordClassifier<L> {
    pub fn new(table: &[(&str, L)]) -> Result<Self> {
        let patterns: Vec<&str> = table.iter().map(|(keyword, _)| *keyword).collect();
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
            .map_err(|e| CvTailorError::Processing(format!("Failed to build keyword matcher: {}", e)))?;

        Ok(Self {
            matcher,
            labels: table.iter().map(|(_, label)| label.clone()).collect(),
        })
    }

    /// Which table entries occur in `text`, indexed by declaration position
    fn hits(&self, text: &str) -> Vec<bool> {
        let mut hits = vec![false; self.labels.len()];
        for mat in self.matcher.find_overlapping_iter(text) {
            hits[mat.pattern().as_usize()] = true;
        }
        hits
    }

    /// All matching labels in declaration order, each label at most once
    pub fn classify(&self, text: &str) -> Vec<L> {
        let mut labels: Vec<L> = Vec::new();
        for (label, hit) in self.labels.iter().zip(self.hits(text)) {
            if hit && !labels.contains(label) {
                labels.push(label.clone());
            }
        }
        labels
    }

    /// Label of the earliest declared entry found in `text`
    pub fn first_match(&self, text: &str) -> Option<L> {
        self.hits(text)
            .into_iter()
            .position(|hit| hit)
            .map(|idx| self.labels[idx].clone())
    }

    pub fn matches_any(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }
}
