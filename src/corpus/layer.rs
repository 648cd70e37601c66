use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::Sentence;

/// Prefix for layers that hold sentence-level indicator labels
pub static INDICATOR_PREFIX: &str = "label:";

/// A contiguous run of tokens, with an exclusive end
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenSpan {
    start: usize,
    end: usize,
}

impl TokenSpan {
    /// Create a span over `[start, end)`, rejecting empty or inverted ranges
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if end <= start {
            return Err(Error::InvalidSpan { start, end });
        }

        Ok(Self { start, end })
    }

    /// Create a span from inclusive first and last token indices
    pub fn inclusive(first: usize, last: usize) -> Result<Self> {
        Self::new(first, last + 1)
    }

    /// Covered token indices
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// A named annotation layer on a sentence
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Layer {
    /// Token spans in insertion order
    Spans(Vec<TokenSpan>),

    /// A sentence-level binary label
    Indicator(bool),
}

impl Layer {
    /// A short name for the kind of layer
    pub fn kind(&self) -> &'static str {
        match self {
            Layer::Spans(_) => "token spans",
            Layer::Indicator(_) => "indicator",
        }
    }
}

impl Sentence {
    /// Append a span to the layer for `entity_type`. Duplicates are kept.
    pub fn add_span(&mut self, entity_type: &str, span: TokenSpan) -> Result<()> {
        let layer = self
            .layers
            .entry(entity_type.to_string())
            .or_insert_with(|| Layer::Spans(Vec::new()));

        match layer {
            Layer::Spans(spans) => {
                spans.push(span);
                Ok(())
            }
            other => Err(Error::UnsupportedAnnotationKind {
                key: self.key.clone(),
                layer: entity_type.to_string(),
                found: other.kind(),
            }),
        }
    }

    /// Spans for `entity_type` in insertion order, empty when none were added
    pub fn spans(&self, entity_type: &str) -> Result<&[TokenSpan]> {
        match self.layers.get(entity_type) {
            None => Ok(&[]),
            Some(Layer::Spans(spans)) => Ok(spans),
            Some(other) => Err(Error::UnsupportedAnnotationKind {
                key: self.key.clone(),
                layer: entity_type.to_string(),
                found: other.kind(),
            }),
        }
    }

    /// Record the sentence-level label for `entity_type`
    pub fn set_indicator(&mut self, entity_type: &str, value: bool) {
        self.layers.insert(
            format!("{}{}", INDICATOR_PREFIX, entity_type),
            Layer::Indicator(value),
        );
    }

    /// The sentence-level label for `entity_type`, if one was recorded
    pub fn indicator(&self, entity_type: &str) -> Option<bool> {
        match self
            .layers
            .get(&format!("{}{}", INDICATOR_PREFIX, entity_type))
        {
            Some(Layer::Indicator(value)) => Some(*value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::corpus::SentenceKey;

    fn sentence() -> Sentence {
        Sentence::new(SentenceKey::new("d".to_string(), 0), "a b c", vec![])
    }

    #[test]
    fn rejects_empty_spans() {
        assert!(matches!(
            TokenSpan::new(3, 3),
            Err(Error::InvalidSpan { start: 3, end: 3 })
        ));
        assert!(TokenSpan::new(4, 2).is_err());
        assert_eq!(TokenSpan::inclusive(2, 3).unwrap().range(), 2..4);
    }

    #[test]
    fn keeps_insertion_order_and_duplicates() {
        let mut s = sentence();
        let a = TokenSpan::new(2, 3).unwrap();
        let b = TokenSpan::new(0, 1).unwrap();

        s.add_span("ADR", a).unwrap();
        s.add_span("ADR", b).unwrap();
        s.add_span("ADR", a).unwrap();

        assert_eq!(s.spans("ADR").unwrap(), &[a, b, a]);
        assert!(s.spans("WD").unwrap().is_empty());
    }

    #[test]
    fn indicators_do_not_collide_with_spans() {
        let mut s = sentence();
        s.set_indicator("ADR", true);
        s.add_span("ADR", TokenSpan::new(0, 1).unwrap()).unwrap();

        assert_eq!(s.indicator("ADR"), Some(true));
        assert_eq!(s.indicator("WD"), None);
        assert_eq!(s.spans("ADR").unwrap().len(), 1);
    }

    #[test]
    fn non_span_layers_are_unsupported() {
        let mut s = sentence();
        s.set_indicator("ADR", false);

        let err = s.spans("label:ADR").unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedAnnotationKind { found: "indicator", .. }
        ));

        let err = s
            .add_span("label:ADR", TokenSpan::new(0, 1).unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedAnnotationKind { .. }));
    }
}
