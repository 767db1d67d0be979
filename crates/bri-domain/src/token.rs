//! Token module - the unit handed from a tokenizer to a label oracle

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position-tagged run of text
///
/// `start_position` is a byte offset into the text that was tokenized.
/// Tokens for one input are always produced in strictly increasing
/// `start_position` order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Token text (a word, a single dash, or a sentinel)
    pub text: String,

    /// Byte offset of the token in the tokenized text
    pub start_position: usize,

    /// Whether a single space should follow this token when re-joined
    pub whitespace_after: bool,
}

impl Token {
    /// Create a new token
    pub fn new(text: impl Into<String>, start_position: usize, whitespace_after: bool) -> Self {
        Self {
            text: text.into(),
            start_position,
            whitespace_after,
        }
    }

    /// Byte offset one past the end of the token's text
    ///
    /// Sentinel tokens stand in for a single source character, so their end
    /// is measured from the source, not from the sentinel text.
    pub fn end_position(&self) -> usize {
        match self.text.as_str() {
            crate::tokenizer::NEWLINE_TOKEN => self.start_position + 1,
            text => self.start_position + text.len(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.text, self.start_position)
    }
}

/// Re-join tokens into text, inserting a single space after every token
/// whose `whitespace_after` flag is set
///
/// # Examples
///
/// ```
/// use bri_domain::{detokenize, Token};
///
/// let tokens = vec![
///     Token::new("Choice", 0, true),
///     Token::new("-", 7, true),
///     Token::new("v35", 9, false),
/// ];
/// assert_eq!(detokenize(&tokens), "Choice - v35");
/// ```
pub fn detokenize(tokens: &[Token]) -> String {
    let mut out = String::new();
    for (idx, token) in tokens.iter().enumerate() {
        out.push_str(&token.text);
        if token.whitespace_after && idx + 1 < tokens.len() {
            out.push(' ');
        }
    }
    out
}
