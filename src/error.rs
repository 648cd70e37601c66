use crate::corpus::SentenceKey;

/// Result type used throughout the converter
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a conversion run
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A layer was requested as token spans but holds another annotation kind
    #[error("unsupported annotation kind {found} for layer {layer} on {key}")]
    UnsupportedAnnotationKind {
        /// The sentence holding the layer
        key: SentenceKey,
        /// The layer name
        layer: String,
        /// The kind actually stored under that name
        found: &'static str,
    },

    /// The partitioner lost or duplicated items
    #[error("partition size mismatch: {train} + {dev} + {test} != {total}")]
    PartitionSizeMismatch {
        /// Train size
        train: usize,
        /// Dev size
        dev: usize,
        /// Test size
        test: usize,
        /// Number of input items
        total: usize,
    },

    /// A token span with an end at or before its start
    #[error("invalid token span [{start}, {end})")]
    InvalidSpan {
        /// Start token index
        start: usize,
        /// Exclusive end token index
        end: usize,
    },

    /// A required column is absent from a tabular source
    #[error("missing column {column} in {source_name}")]
    MissingColumn {
        /// Column name
        column: String,
        /// Which file or sheet was being read
        source_name: String,
    },

    /// An indicator cell that is neither a marker nor a number
    #[error("invalid indicator value {value:?} in column {column}")]
    InvalidIndicator {
        /// Column name
        column: String,
        /// Raw cell text
        value: String,
    },

    /// A sentence_index cell that is not a non-negative integer
    #[error("invalid sentence index {0:?}")]
    InvalidSentenceIndex(String),

    /// The tokenizer failed on a sentence
    #[error("unable to tokenize {0}")]
    Tokenize(String),

    /// I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV read or write failure
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// JSON serialization failure
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML config failure
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// Template parse or render failure
    #[error(transparent)]
    Template(#[from] liquid::Error),
}
