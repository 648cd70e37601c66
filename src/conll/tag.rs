use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};

/// The label used for every span when entity types are conflated
pub static CONFLATED_LABEL: &str = "Entity";

/// A BIO tag for one token
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Not part of any span
    Outside,

    /// First token of a span
    Begin(String),

    /// A following token of a span
    Inside(String),
}

impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tag::Outside => write!(f, "O"),
            Tag::Begin(label) => write!(f, "B-{}", label),
            Tag::Inside(label) => write!(f, "I-{}", label),
        }
    }
}

/// The tag vocabulary for a set of labels, in the `id2label`/`label2id` shape token
/// classification training expects
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSet {
    /// A mapping from tag ids to tag names
    pub id2label: BTreeMap<usize, String>,

    /// A mapping from tag names to tag ids
    pub label2id: BTreeMap<String, usize>,
}

impl TagSet {
    /// Build the vocabulary: `O` first, then `B-` and `I-` for each label in order
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut names = vec![Tag::Outside.to_string()];

        for label in labels {
            names.push(Tag::Begin(label.as_ref().to_string()).to_string());
            names.push(Tag::Inside(label.as_ref().to_string()).to_string());
        }

        let id2label: BTreeMap<usize, String> = names.into_iter().enumerate().collect();
        let label2id = id2label
            .iter()
            .map(|(id, name)| (name.clone(), *id))
            .collect();

        Self { id2label, label2id }
    }

    /// The vocabulary for conflated output
    pub fn conflated() -> Self {
        Self::new(&[CONFLATED_LABEL])
    }

    /// Number of tags
    pub fn len(&self) -> usize {
        self.id2label.len()
    }

    /// Always false, `O` is always present
    pub fn is_empty(&self) -> bool {
        self.id2label.is_empty()
    }
}
