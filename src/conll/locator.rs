use crate::{
    corpus::{Token, TokenSpan},
    tokenizer::token_at_char,
};

/// Why an excerpt could not be resolved to tokens
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    /// The excerpt does not occur in the sentence
    #[error("excerpt {0:?} not found")]
    NotFound(String),

    /// The excerpt occurs, but a boundary character is not covered by any token
    #[error("excerpt {excerpt:?} at character {offset} does not align with a token")]
    Unaligned {
        /// The trimmed excerpt
        excerpt: String,
        /// The uncovered character offset
        offset: usize,
    },
}

/// Resolve an annotator excerpt to the tokens it covers
///
/// The excerpt is trimmed and matched case-insensitively against the sentence; the first match
/// wins. The returned span has an exclusive end.
pub fn locate(text: &str, tokens: &[Token], excerpt: &str) -> Result<TokenSpan, LocateError> {
    let needle = excerpt.trim();

    let start_char =
        find_ignore_case(text, needle).ok_or_else(|| LocateError::NotFound(needle.to_string()))?;
    let last_char = start_char + needle.chars().count() - 1;

    let token_at = |offset| {
        token_at_char(tokens, offset).ok_or_else(|| LocateError::Unaligned {
            excerpt: needle.to_string(),
            offset,
        })
    };

    let first = token_at(start_char)?;
    let last = token_at(last_char)?;

    TokenSpan::inclusive(first.index, last.index).map_err(|_| LocateError::Unaligned {
        excerpt: needle.to_string(),
        offset: last_char,
    })
}

/// Character offset of the first case-insensitive occurrence of `needle` in `haystack`
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let haystack: Vec<char> = haystack.chars().collect();
    let needle: Vec<char> = needle.chars().collect();

    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }

    (0..=haystack.len() - needle.len()).find(|&start| {
        haystack[start..start + needle.len()]
            .iter()
            .zip(&needle)
            .all(|(a, b)| chars_eq_ignore_case(*a, *b))
    })
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tokenizer::{BertWordTokenizer, Tokenizer};

    fn resolve(text: &str, excerpt: &str) -> Result<TokenSpan, LocateError> {
        let tokens = BertWordTokenizer.tokenize(text).unwrap();

        locate(text, &tokens, excerpt)
    }

    #[test]
    fn matches_regardless_of_case() {
        let span = resolve("The Patient felt DIZZY.", "dizzy").unwrap();

        assert_eq!(span.range(), 3..4);
    }

    #[test]
    fn trims_excerpt_whitespace() {
        let span = resolve("I felt very dizzy today", "  very dizzy\n").unwrap();

        assert_eq!(span.range(), 2..4);
    }

    #[test]
    fn reports_missing_excerpts() {
        assert_eq!(
            resolve("He had no symptoms.", "nausea"),
            Err(LocateError::NotFound("nausea".to_string()))
        );
    }

    #[test]
    fn uses_the_first_occurrence() {
        let span = resolve("tired and then tired again", "TIRED").unwrap();

        assert_eq!(span.range(), 0..1);
    }

    #[test]
    fn extends_partial_words_to_whole_tokens() {
        let span = resolve("severe headaches daily", "ere headache").unwrap();

        assert_eq!(span.range(), 0..2);
    }

    #[test]
    fn reports_boundaries_outside_tokens() {
        let tokens = vec![
            Token::new("dry".to_string(), 0, 3, 0),
            Token::new("mouth".to_string(), 4, 9, 1),
        ];

        assert_eq!(
            locate("dry mouth", &tokens[..1], "dry mouth"),
            Err(LocateError::Unaligned {
                excerpt: "dry mouth".to_string(),
                offset: 8
            })
        );
    }

    #[test]
    fn finds_with_character_offsets() {
        assert_eq!(find_ignore_case("Ça va MIEUX", "mieux"), Some(6));
        assert_eq!(find_ignore_case("abc", ""), None);
        assert_eq!(find_ignore_case("ab", "abc"), None);
    }
}
