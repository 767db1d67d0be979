//! Delimiter-driven tokenizers for index text
//!
//! Both variants share one single-pass scanner. The scanner tracks where the
//! current word started; each delimiter either closes the word and is dropped
//! (space, apostrophe) or closes the word and is emitted as its own token
//! (dash, newline).
//!
//! Offsets are byte offsets, so non-ASCII text tokenizes without panicking
//! and every word token's text equals the source slice at its offset.

use crate::token::Token;
use crate::traits::Tokenizer;

/// Sentinel token text that stands in for a `\n` in extraction text
pub const NEWLINE_TOKEN: &str = "[newline]";

/// What the scanner does with a delimiter character
#[derive(Debug, Clone, Copy)]
enum Delimiter {
    /// Close the current word and drop the delimiter
    Split { whitespace_after: bool },
    /// Close the current word and emit the given token text in its place
    Emit(&'static str),
}

/// Tokenizer for single review strings, used before field labeling
///
/// Splits on spaces and apostrophes, which it removes, and on dashes, which
/// it keeps as one-character tokens.
///
/// # Examples
///
/// ```
/// use bri_domain::{ReviewTokenizer, Tokenizer};
///
/// let tokens = ReviewTokenizer.tokenize("D '97 - p690");
/// let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
/// assert_eq!(texts, vec!["D", "97", "-", "p690"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewTokenizer;

impl Tokenizer for ReviewTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        scan(text, |ch| match ch {
            ' ' => Some(Delimiter::Split { whitespace_after: true }),
            '\'' => Some(Delimiter::Split { whitespace_after: false }),
            '-' => Some(Delimiter::Emit("-")),
            _ => None,
        })
    }
}

/// Tokenizer for raw multi-record OCR text, used by the chunked extractor
///
/// Splits on spaces, which it removes, and on dashes, which it keeps.
/// A `\n` becomes a single [`NEWLINE_TOKEN`] token.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractTokenizer;

impl Tokenizer for ExtractTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        scan(text, |ch| match ch {
            ' ' => Some(Delimiter::Split { whitespace_after: true }),
            '-' => Some(Delimiter::Emit("-")),
            '\n' => Some(Delimiter::Emit(NEWLINE_TOKEN)),
            _ => None,
        })
    }
}

fn scan<F>(text: &str, classify: F) -> Vec<Token>
where
    F: Fn(char) -> Option<Delimiter>,
{
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (index, ch) in text.char_indices() {
        match classify(ch) {
            None => {
                word_start.get_or_insert(index);
            }
            Some(Delimiter::Split { whitespace_after }) => {
                flush_word(text, &mut tokens, &mut word_start, index, whitespace_after);
            }
            Some(Delimiter::Emit(token_text)) => {
                flush_word(text, &mut tokens, &mut word_start, index, false);
                // Lookahead past the end of text is false, never an error
                let whitespace_after = text[index + ch.len_utf8()..].starts_with(' ');
                tokens.push(Token::new(token_text, index, whitespace_after));
            }
        }
    }

    // Trailing partial word
    flush_word(text, &mut tokens, &mut word_start, text.len(), false);
    tokens
}

fn flush_word(
    text: &str,
    tokens: &mut Vec<Token>,
    word_start: &mut Option<usize>,
    end: usize,
    whitespace_after: bool,
) {
    if let Some(start) = word_start.take() {
        tokens.push(Token::new(&text[start..end], start, whitespace_after));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(tokens: &[Token]) -> Vec<(&str, usize, bool)> {
        tokens
            .iter()
            .map(|t| (t.text.as_str(), t.start_position, t.whitespace_after))
            .collect()
    }

    #[test]
    fn test_review_tokenizer_typical_review() {
        let tokens = ReviewTokenizer.tokenize("Choice - v35 - D '97 - p690");
        assert_eq!(
            summary(&tokens),
            vec![
                ("Choice", 0, true),
                ("-", 7, true),
                ("v35", 9, true),
                ("-", 13, true),
                ("D", 15, true),
                ("97", 18, true),
                ("-", 21, true),
                ("p690", 23, false),
            ]
        );
    }

    #[test]
    fn test_review_tokenizer_apostrophe_ends_word_without_space() {
        let tokens = ReviewTokenizer.tokenize("D'97");
        assert_eq!(summary(&tokens), vec![("D", 0, false), ("97", 2, false)]);
    }

    #[test]
    fn test_review_tokenizer_dash_inside_word() {
        let tokens = ReviewTokenizer.tokenize("H-Net");
        assert_eq!(
            summary(&tokens),
            vec![("H", 0, false), ("-", 1, false), ("Net", 2, false)]
        );
    }

    #[test]
    fn test_dash_at_end_of_text() {
        let tokens = ReviewTokenizer.tokenize("p45 -");
        assert_eq!(summary(&tokens), vec![("p45", 0, true), ("-", 4, false)]);

        let tokens = ExtractTokenizer.tokenize("Rivers-");
        assert_eq!(summary(&tokens), vec![("Rivers", 0, false), ("-", 6, false)]);
    }

    #[test]
    fn test_consecutive_delimiters_produce_no_empty_tokens() {
        let tokens = ReviewTokenizer.tokenize("  Choice   ' LJ  ");
        assert_eq!(summary(&tokens), vec![("Choice", 2, true), ("LJ", 13, true)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(ReviewTokenizer.tokenize("").is_empty());
        assert!(ExtractTokenizer.tokenize("").is_empty());
    }

    #[test]
    fn test_extract_tokenizer_newline_sentinel() {
        let tokens = ExtractTokenizer.tokenize("Smith, J\nRivers -\n Choice");
        assert_eq!(
            summary(&tokens),
            vec![
                ("Smith,", 0, true),
                ("J", 7, false),
                (NEWLINE_TOKEN, 8, false),
                ("Rivers", 9, true),
                ("-", 16, false),
                (NEWLINE_TOKEN, 17, true),
                ("Choice", 19, false),
            ]
        );
    }

    #[test]
    fn test_extract_tokenizer_keeps_apostrophes() {
        let tokens = ExtractTokenizer.tokenize("D '97");
        assert_eq!(summary(&tokens), vec![("D", 0, true), ("'97", 2, false)]);
    }

    #[test]
    fn test_non_ascii_offsets_are_byte_offsets() {
        let tokens = ReviewTokenizer.tokenize("Économie - LJ");
        assert_eq!(tokens[0].text, "Économie");
        assert_eq!(tokens[1].start_position, "Économie ".len());
        assert_eq!(tokens[2].start_position, "Économie - ".len());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::token::detokenize;
    use proptest::prelude::*;

    fn check_offsets(text: &str, tokens: &[Token]) -> Result<(), TestCaseError> {
        let mut previous: Option<usize> = None;
        for token in tokens {
            prop_assert!(!token.text.is_empty());
            if let Some(prev) = previous {
                prop_assert!(token.start_position > prev, "offsets must strictly increase");
            }
            prop_assert!(token.end_position() <= text.len());
            if token.text != NEWLINE_TOKEN {
                prop_assert_eq!(&text[token.start_position..token.end_position()], token.text.as_str());
            }
            previous = Some(token.start_position);
        }
        Ok(())
    }

    fn separator() -> impl Strategy<Value = &'static str> {
        prop_oneof![Just(" "), Just(" - "), Just("-"), Just(" -"), Just("- ")]
    }

    proptest! {
        /// Property: offsets strictly increase and every word is a source slice
        #[test]
        fn test_review_tokenizer_offsets(text in "[a-zA-Z0-9é '\\-]{0,60}") {
            let tokens = ReviewTokenizer.tokenize(&text);
            check_offsets(&text, &tokens)?;
        }

        /// Property: offsets strictly increase for extraction text with newlines
        #[test]
        fn test_extract_tokenizer_offsets(text in "[a-zA-Z0-9é ',\\-\\n]{0,60}") {
            let tokens = ExtractTokenizer.tokenize(&text);
            check_offsets(&text, &tokens)?;
        }

        /// Property: nothing but dropped delimiters is lost
        #[test]
        fn test_review_tokenizer_is_lossless(text in "[a-zA-Z0-9 '\\-]{0,60}") {
            let tokens = ReviewTokenizer.tokenize(&text);
            let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
            let expected: String = text.chars().filter(|c| *c != ' ' && *c != '\'').collect();
            prop_assert_eq!(joined, expected);
        }

        /// Property: newline sentinels map back to exactly one newline each
        #[test]
        fn test_extract_tokenizer_is_lossless(text in "[a-zA-Z0-9 '\\-\\n]{0,60}") {
            let tokens = ExtractTokenizer.tokenize(&text);
            let joined: String = tokens
                .iter()
                .map(|t| if t.text == NEWLINE_TOKEN { "\n" } else { t.text.as_str() })
                .collect();
            let expected: String = text.chars().filter(|c| *c != ' ').collect();
            prop_assert_eq!(joined, expected);
        }

        /// Property: already-normalized text survives a tokenize/detokenize round trip
        #[test]
        fn test_normalized_round_trip(
            words in prop::collection::vec("[a-zA-Z0-9]{1,6}", 1..8),
            seps in prop::collection::vec(separator(), 8),
        ) {
            let mut text = String::new();
            for (idx, word) in words.iter().enumerate() {
                if idx > 0 {
                    text.push_str(seps[idx - 1]);
                }
                text.push_str(word);
            }
            prop_assert_eq!(detokenize(&ReviewTokenizer.tokenize(&text)), text.clone());
            prop_assert_eq!(detokenize(&ExtractTokenizer.tokenize(&text)), text);
        }
    }
}
