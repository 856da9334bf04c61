//! Shared-column detection between uploaded tables

use crate::explorer::dataset::DatasetCollection;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Two datasets that share at least one column name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinKeyCandidate {
    pub left: String,
    pub right: String,
    pub columns: BTreeSet<String>,
}

impl JoinKeyCandidate {
    fn connects(&self, a: &str, b: &str) -> bool {
        (self.left == a && self.right == b) || (self.left == b && self.right == a)
    }

    /// Column used by generated JOIN templates
    pub fn join_column(&self) -> Option<&str> {
        self.columns.iter().next().map(String::as_str)
    }
}

/// Join candidates keyed by dataset pair, in upload order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinKeys {
    pub candidates: Vec<JoinKeyCandidate>,
}

impl JoinKeys {
    /// Shared columns of two datasets, whichever order they are named in
    pub fn columns_between(&self, a: &str, b: &str) -> Option<&BTreeSet<String>> {
        self.candidates
            .iter()
            .find(|candidate| candidate.connects(a, b))
            .map(|candidate| &candidate.columns)
    }

    pub fn first(&self) -> Option<&JoinKeyCandidate> {
        self.candidates.first()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }
}

/// Intersect the column names of every unordered pair of datasets.
///
/// Pure name equality: no type checks and no key inference. Quadratic in the
/// number of datasets.
pub fn detect_relationships(datasets: &DatasetCollection) -> JoinKeys {
    let tables: Vec<_> = datasets.iter().collect();
    let mut candidates = Vec::new();

    for (i, left) in tables.iter().enumerate() {
        let left_columns: BTreeSet<&String> = left.headers.iter().collect();
        for right in &tables[i + 1..] {
            let columns: BTreeSet<String> = right
                .headers
                .iter()
                .filter(|column| left_columns.contains(column))
                .cloned()
                .collect();

            if !columns.is_empty() {
                debug!("{} <-> {} share {:?}", left.name, right.name, columns);
                candidates.push(JoinKeyCandidate {
                    left: left.name.clone(),
                    right: right.name.clone(),
                    columns,
                });
            }
        }
    }

    JoinKeys { candidates }
}
