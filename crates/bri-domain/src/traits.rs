//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the parsing engine and the
//! pieces it treats as collaborators. Oracle implementations live in
//! `bri-oracle`.

use crate::field::LabeledSpan;
use crate::token::Token;

/// Converts raw text into an ordered sequence of position-tagged tokens
///
/// Implementations must be deterministic and total: every input string
/// tokenizes, and tokens come back in strictly increasing
/// `start_position` order.
pub trait Tokenizer {
    /// Tokenize `text`
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Assigns field labels to spans of tokens
///
/// Implemented by the infrastructure layer (bri-oracle). The statistical
/// model behind a real oracle is out of scope here; the engine only relies
/// on this contract:
///
/// - `text` is the window the tokens were produced from
/// - returned spans are in increasing offset order
/// - span offsets are byte offsets local to `text`
pub trait LabelOracle {
    /// Error type for labeling operations
    type Error;

    /// Label the tokens of one window
    fn label(&self, text: &str, tokens: &[Token]) -> Result<Vec<LabeledSpan>, Self::Error>;
}

impl<O: LabelOracle + ?Sized> LabelOracle for &O {
    type Error = O::Error;

    fn label(&self, text: &str, tokens: &[Token]) -> Result<Vec<LabeledSpan>, Self::Error> {
        (**self).label(text, tokens)
    }
}
