use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::corpus::SentenceKey;

/// Diagnostics for one conversion run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Excerpts handed to the locator
    pub attempts: usize,

    /// Excerpts that could not be located
    pub failures: usize,

    /// Distinct sentences excluded because of a failure
    pub invalid_sentences: usize,

    /// Annotation rows that referenced a sentence missing from the corpus
    pub missing_references: usize,
}

impl Summary {
    /// Excerpts that resolved to a span
    pub fn located(&self) -> usize {
        self.attempts.saturating_sub(self.failures)
    }
}

/// Tracks which sentences are excluded from the emitted datasets
///
/// A sentence becomes invalid as soon as any one of its excerpts fails to resolve, and never
/// becomes valid again.
#[derive(Clone, Debug, Default)]
pub struct Tracker {
    invalid: BTreeSet<SentenceKey>,
    attempts: usize,
    failures: usize,
    missing_references: usize,
}

impl Tracker {
    /// Count an excerpt handed to the locator
    pub fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    /// Count a failed excerpt and exclude its sentence
    pub fn mark_invalid(&mut self, key: &SentenceKey) {
        self.failures += 1;

        if !self.invalid.contains(key) {
            self.invalid.insert(key.clone());
        }
    }

    /// Whether the sentence is excluded
    pub fn is_invalid(&self, key: &SentenceKey) -> bool {
        self.invalid.contains(key)
    }

    /// Count an annotation row whose sentence is not in the corpus
    pub fn record_missing(&mut self) {
        self.missing_references += 1;
    }

    /// Counts for the run
    pub fn summary(&self) -> Summary {
        Summary {
            attempts: self.attempts,
            failures: self.failures,
            invalid_sentences: self.invalid.len(),
            missing_references: self.missing_references,
        }
    }
}
