use std::fmt::Write as _;

use derive_new::new;

use crate::{corpus::Sentence, error::Result};

use super::tag::{Tag, CONFLATED_LABEL};

/// A token paired with its tag
#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct Tagged {
    /// The token text
    pub token: String,

    /// The assigned tag
    pub tag: Tag,
}

/// Tag a sentence from the spans of a single entity type
pub fn encode(sentence: &Sentence, entity_type: &str, conflate: bool) -> Result<Vec<Tagged>> {
    encode_layers(sentence, &[entity_type], conflate)
}

/// Tag a sentence from the spans of several entity types merged into one sequence
///
/// Layers are applied in the given order and spans in insertion order. Where spans overlap the
/// last one written wins.
pub fn encode_layers<S: AsRef<str>>(
    sentence: &Sentence,
    entity_types: &[S],
    conflate: bool,
) -> Result<Vec<Tagged>> {
    let n = sentence.tokens.len();
    let mut tags = vec![Tag::Outside; n];

    for entity_type in entity_types {
        let entity_type = entity_type.as_ref();
        let label = if conflate {
            CONFLATED_LABEL
        } else {
            entity_type
        };

        for span in sentence.spans(entity_type)? {
            let range = span.range();
            if range.start >= n {
                continue;
            }

            tags[range.start] = Tag::Begin(label.to_string());

            for tag in &mut tags[range.start + 1..range.end.min(n)] {
                *tag = Tag::Inside(label.to_string());
            }
        }
    }

    Ok(sentence
        .words()
        .zip(tags)
        .map(|(token, tag)| Tagged::new(token.to_string(), tag))
        .collect())
}

/// Render a tagged sentence as a CONLL block: `token<TAB>tag` lines and a closing blank line
pub fn to_conll(tagged: &[Tagged]) -> String {
    let mut block = String::new();

    for Tagged { token, tag } in tagged {
        // Writing into a String cannot fail
        let _ = writeln!(block, "{}\t{}", token, tag);
    }
    block.push('\n');

    block
}
