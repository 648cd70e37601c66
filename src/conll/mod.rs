/// Excerpt to token span resolution
pub mod locator;

/// BIO tags and tag vocabularies
pub mod tag;

/// BIO encoding of annotated sentences
pub mod encoder;

pub use encoder::{encode, encode_layers, to_conll, Tagged};
pub use locator::{locate, LocateError};
pub use tag::{Tag, TagSet, CONFLATED_LABEL};

/// Which labels the CONLL output carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Every entity type keeps its own label
    All,

    /// Every entity type is written as `Entity`
    Conflated,
}

impl Mode {
    /// Both modes, in output order
    pub const ALL: [Mode; 2] = [Mode::All, Mode::Conflated];

    /// Whether labels collapse to a single type
    pub fn conflate(&self) -> bool {
        matches!(self, Mode::Conflated)
    }

    /// Directory name for this mode's files
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::All => "all",
            Mode::Conflated => "conflated",
        }
    }
}
