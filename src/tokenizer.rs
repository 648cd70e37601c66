use tokenizers::{
    pre_tokenizers::bert::BertPreTokenizer, OffsetReferential, OffsetType, PreTokenizedString,
    PreTokenizer,
};

use crate::{
    corpus::Token,
    error::{Error, Result},
};

/// Splits raw sentence text into tokens carrying character offsets
pub trait Tokenizer {
    /// Tokenize a sentence
    fn tokenize(&self, text: &str) -> Result<Vec<Token>>;
}

/// Find the token covering a character offset
pub fn token_at_char(tokens: &[Token], offset: usize) -> Option<&Token> {
    // Tokens are ordered and non-overlapping
    let i = tokens.partition_point(|t| t.char_end <= offset);

    tokens.get(i).filter(|t| t.contains(offset))
}

/// Word-level tokenizer that splits on whitespace and punctuation, as BERT does before wordpieces
#[derive(Clone, Debug, Default)]
pub struct BertWordTokenizer;

impl Tokenizer for BertWordTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let mut pretokenized = PreTokenizedString::from(text);

        BertPreTokenizer
            .pre_tokenize(&mut pretokenized)
            .map_err(|e| Error::Tokenize(format!("{:?}: {}", text, e)))?;

        let tokens = pretokenized
            .get_splits(OffsetReferential::Original, OffsetType::Char)
            .into_iter()
            .enumerate()
            .map(|(index, (word, (start, end), _))| Token::new(word.to_string(), start, end, index))
            .collect();

        Ok(tokens)
    }
}
