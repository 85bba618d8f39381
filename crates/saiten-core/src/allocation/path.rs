//! Structured criterion paths
//!
//! A path is the ordered list of labels from a top-level question down to a
//! criterion. The `_`-joined flat key is only derived when a score has to be
//! addressed in a ledger or on the command line.

use std::fmt;

/// Separator used when joining labels into a flat key
pub const FLAT_KEY_SEPARATOR: char = '_';

/// Ordered labels from the schema root to a node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CriterionPath {
    labels: Vec<String>,
}

impl CriterionPath {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// The empty path (schema root)
    pub fn root() -> Self {
        Self::default()
    }

    /// Return a new path with `label` appended
    pub fn child(&self, label: &str) -> Self {
        let mut labels = self.labels.clone();
        labels.push(label.to_string());
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Last label on the path, used as the widget caption for a criterion
    pub fn leaf_label(&self) -> Option<&str> {
        self.labels.last().map(String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.labels.len()
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Join labels with `_` into the key used by ledgers and score inputs
    pub fn flat_key(&self) -> String {
        let mut key = String::new();
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                key.push(FLAT_KEY_SEPARATOR);
            }
            key.push_str(label);
        }
        key
    }
}

/// Human-readable form used in error messages (`Q2 > A`)
impl fmt::Display for CriterionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return write!(f, "<root>");
        }
        write!(f, "{}", self.labels.join(" > "))
    }
}
