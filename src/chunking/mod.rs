//! Word-count chunking of transcript text.
//!
//! Splits normalized text into ordered segments of at most `max_words`
//! whitespace-delimited tokens. Every chunk but the last holds exactly
//! `max_words` tokens; concatenating the chunks' tokens reproduces the input.

use crate::error::{Result, VibeError};

/// Split `text` into consecutive chunks of `max_words` tokens joined by single spaces.
///
/// Empty or whitespace-only text yields no chunks. A `max_words` of zero is
/// rejected with [`VibeError::InvalidArgument`].
pub fn split_text(text: &str, max_words: usize) -> Result<Vec<String>> {
    if max_words == 0 {
        return Err(VibeError::InvalidArgument(
            "max_words must be a positive integer".to_string(),
        ));
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    Ok(words.chunks(max_words).map(|group| group.join(" ")).collect())
}

/// Number of whitespace-delimited tokens in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(chunks: &[String]) -> Vec<String> {
        chunks
            .iter()
            .flat_map(|c| c.split_whitespace().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_split_exact_groups() {
        let chunks = split_text("one two three four five six", 2).unwrap();
        assert_eq!(chunks, vec!["one two", "three four", "five six"]);
    }

    #[test]
    fn test_last_chunk_is_shorter() {
        let chunks = split_text("a b c d e", 2).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2], "e");
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(split_text("", 10).unwrap().is_empty());
        assert!(split_text("   \n\t  ", 10).unwrap().is_empty());
    }

    #[test]
    fn test_zero_max_words_is_rejected() {
        let err = split_text("some words", 0).unwrap_err();
        assert!(matches!(err, VibeError::InvalidArgument(_)));
    }

    #[test]
    fn test_reconstruction_and_sizing() {
        let text = "Welcome everyone.\n\n  Today we   look at\trust ownership,\nborrowing and lifetimes \
                    in a practical way with plenty of examples along the road.";
        let original: Vec<String> = text.split_whitespace().map(str::to_string).collect();

        for max_words in 1..=original.len() + 2 {
            let chunks = split_text(text, max_words).unwrap();
            assert_eq!(tokens(&chunks), original, "max_words = {}", max_words);

            let (last, rest) = chunks.split_last().unwrap();
            for chunk in rest {
                assert_eq!(word_count(chunk), max_words);
            }
            assert!(word_count(last) >= 1 && word_count(last) <= max_words);
            assert_eq!(chunks.len(), original.len().div_ceil(max_words));
        }
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let chunks = split_text("  hello\n\nworld  again ", 5).unwrap();
        assert_eq!(chunks, vec!["hello world again"]);
    }
}
