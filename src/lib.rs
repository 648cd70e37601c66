//! # ADR CoNLL
//!
//! Converts sentences with free-text adverse drug reaction annotations into BIO-tagged CONLL
//! datasets with reproducible train/dev/test splits.
#![forbid(unsafe_code)]

/// Sentences, tokens and annotation layers
pub mod corpus;

/// Tokenization with character offsets
pub mod tokenizer;

/// Span location and BIO encoding
pub mod conll;

/// Train/dev/test partitioning
pub mod splits;

/// Excluded sentences and run diagnostics
pub mod validity;

/// Datasets
pub mod datasets;

/// The conversion pipeline
pub mod pipeline;

/// Output artifacts
pub mod output;

/// Run configuration
pub mod config;

/// Error types
pub mod error;

pub use error::{Error, Result};
