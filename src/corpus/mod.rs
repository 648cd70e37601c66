use std::{collections::BTreeMap, fmt::Display};

use derive_new::new;
use serde::{Deserialize, Serialize};

/// Annotation layers and token spans
pub mod layer;

pub use layer::{Layer, TokenSpan};

/// A token produced by the tokenizer, with half-open character offsets into its sentence
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Token {
    /// The token text
    pub text: String,

    /// First character covered by the token
    pub char_start: usize,

    /// One past the last character covered by the token
    pub char_end: usize,

    /// Position of the token within its sentence
    pub index: usize,
}

impl Token {
    /// Whether the token covers the given character offset
    pub fn contains(&self, offset: usize) -> bool {
        self.char_start <= offset && offset < self.char_end
    }
}

/// Identity of a sentence: the document (drug) it belongs to and its position there
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, new)]
pub struct SentenceKey {
    /// The document (drug report) identifier
    pub document_id: String,

    /// Position of the sentence within the document
    pub sentence_index: usize,
}

impl Display for SentenceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.document_id, self.sentence_index)
    }
}

/// A tokenized sentence and the annotation layers attached to it
#[derive(Clone, Debug)]
pub struct Sentence {
    /// Identity of the sentence
    pub key: SentenceKey,

    /// The raw sentence text
    pub text: String,

    /// Tokens in sentence order
    pub tokens: Vec<Token>,

    /// Named annotation layers
    pub(crate) layers: BTreeMap<String, Layer>,
}

impl Sentence {
    /// Create a sentence with no annotations
    pub fn new(key: SentenceKey, text: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            key,
            text: text.into(),
            tokens,
            layers: BTreeMap::new(),
        }
    }

    /// The token texts in order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.text.as_str())
    }
}

/// All sentences of one source record, keyed by sentence index
#[derive(Clone, Debug, Default)]
pub struct Document {
    sentences: BTreeMap<usize, Sentence>,
}

impl Document {
    /// Look up a sentence by index
    pub fn get(&self, sentence_index: usize) -> Option<&Sentence> {
        self.sentences.get(&sentence_index)
    }

    /// Sentences in index order
    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> {
        self.sentences.values()
    }

    /// Number of sentences
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Whether the document has no sentences
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// The sentence repository for one conversion run: documents keyed by id
///
/// Iteration is ordered by `(document_id, sentence_index)`; this is the input order every
/// partitioning strategy depends on.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
    documents: BTreeMap<String, Document>,
}

impl Corpus {
    /// Insert a sentence, replacing any sentence already registered under the same key
    pub fn insert(&mut self, sentence: Sentence) -> Option<Sentence> {
        self.documents
            .entry(sentence.key.document_id.clone())
            .or_default()
            .sentences
            .insert(sentence.key.sentence_index, sentence)
    }

    /// Look up a sentence
    pub fn get(&self, key: &SentenceKey) -> Option<&Sentence> {
        self.documents.get(&key.document_id)?.get(key.sentence_index)
    }

    /// Look up a sentence for annotation
    pub fn get_mut(&mut self, key: &SentenceKey) -> Option<&mut Sentence> {
        self.documents
            .get_mut(&key.document_id)?
            .sentences
            .get_mut(&key.sentence_index)
    }

    /// All sentences in input order
    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> {
        self.documents.values().flat_map(Document::sentences)
    }

    /// Total number of sentences
    pub fn len(&self) -> usize {
        self.documents.values().map(Document::len).sum()
    }

    /// Whether the corpus holds no sentences
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sentence(doc: &str, index: usize, text: &str) -> Sentence {
        Sentence::new(SentenceKey::new(doc.to_string(), index), text, vec![])
    }

    #[test]
    fn iterates_in_key_order() {
        let mut corpus = Corpus::default();
        corpus.insert(sentence("zoloft.1", 1, "b"));
        corpus.insert(sentence("lexapro.2", 0, "c"));
        corpus.insert(sentence("zoloft.1", 0, "a"));

        let texts: Vec<_> = corpus.sentences().map(|s| s.text.as_str()).collect();

        assert_eq!(texts, vec!["c", "a", "b"]);
        assert_eq!(corpus.len(), 3);
        assert_eq!(
            corpus
                .get(&SentenceKey::new("zoloft.1".to_string(), 1))
                .map(|s| s.text.as_str()),
            Some("b")
        );
    }

    #[test]
    fn replaces_duplicate_keys() {
        let mut corpus = Corpus::default();
        assert!(corpus.insert(sentence("d", 0, "first")).is_none());

        let previous = corpus.insert(sentence("d", 0, "second"));

        assert_eq!(previous.map(|s| s.text), Some("first".to_string()));
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn token_offsets_are_half_open() {
        let token = Token::new("dizzy".to_string(), 4, 9, 1);

        assert!(token.contains(4));
        assert!(token.contains(8));
        assert!(!token.contains(9));
        assert!(!token.contains(3));
    }
}
