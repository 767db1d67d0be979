//! BRI Label Oracle Layer
//!
//! Implementations of the `LabelOracle` trait from `bri-domain`.
//!
//! # Architecture
//!
//! The statistical sequence labeler that assigns field labels to index text
//! is an external collaborator. The extraction engine only sees the
//! `LabelOracle` contract: tokens in, labeled spans out.
//!
//! # Oracles
//!
//! - `ScriptedOracle`: Deterministic canned responses for testing
//! - `PatternOracle`: Regex rule labeler whose output depends only on token text
//! - `HttpOracle`: Blocking client for a tagging service that hosts the model
//!
//! # Examples
//!
//! ```
//! use bri_domain::{ExtractTokenizer, FieldTag, LabelOracle, LabeledSpan, Tokenizer};
//! use bri_oracle::ScriptedOracle;
//!
//! let spans = vec![LabeledSpan::new(FieldTag::Author, "Smith, J", 0, 8)];
//! let oracle = ScriptedOracle::new(spans.clone());
//!
//! let text = "Smith, J";
//! let tokens = ExtractTokenizer.tokenize(text);
//! assert_eq!(oracle.label(text, &tokens).unwrap(), spans);
//! ```

#![warn(missing_docs)]

pub mod http;
pub mod pattern;
pub mod response;

use bri_domain::{LabelOracle, LabeledSpan, Token};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;

pub use http::HttpOracle;
pub use pattern::PatternOracle;
pub use response::parse_spans;

/// Errors that can occur while labeling a window
///
/// Every variant is fatal for the input being processed; oracles never
/// retry.
#[derive(Error, Debug)]
pub enum OracleError {
    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// The oracle answered, but the spans are malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The labeling service or model is not available
    #[error("Oracle unavailable: {0}")]
    Unavailable(String),

    /// The request did not complete within the configured timeout
    #[error("Oracle request timed out")]
    Timeout,

    /// Failure injected by a scripted oracle
    #[error("Scripted failure for window: {0}")]
    Scripted(String),

    /// Invalid oracle configuration (e.g. a rule pattern that does not compile)
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Scripted oracle for deterministic testing
///
/// Returns pre-configured spans without running any model. Responses can be
/// keyed by the exact window text; unmatched windows get the default spans.
///
/// # Examples
///
/// ```
/// use bri_domain::{FieldTag, LabelOracle, LabeledSpan};
/// use bri_oracle::ScriptedOracle;
///
/// let mut oracle = ScriptedOracle::default();
/// oracle.add_response("LJ", vec![LabeledSpan::new(FieldTag::Journal, "LJ", 0, 2)]);
/// oracle.add_error("broken window");
///
/// assert_eq!(oracle.label("LJ", &[]).unwrap().len(), 1);
/// assert!(oracle.label("other", &[]).unwrap().is_empty());
/// assert!(oracle.label("broken window", &[]).is_err());
/// assert_eq!(oracle.call_count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedOracle {
    default_spans: Vec<LabeledSpan>,
    responses: HashMap<String, Vec<LabeledSpan>>,
    errors: HashSet<String>,
    call_count: Arc<AtomicUsize>,
}

impl ScriptedOracle {
    /// Create a scripted oracle that answers every window with `spans`
    pub fn new(spans: Vec<LabeledSpan>) -> Self {
        Self {
            default_spans: spans,
            ..Self::default()
        }
    }

    /// Answer the window `text` with `spans`
    pub fn add_response(&mut self, text: impl Into<String>, spans: Vec<LabeledSpan>) {
        self.responses.insert(text.into(), spans);
    }

    /// Fail when asked to label the window `text`
    pub fn add_error(&mut self, text: impl Into<String>) {
        self.errors.insert(text.into());
    }

    /// Number of windows labeled so far (shared between clones)
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }
}

impl LabelOracle for ScriptedOracle {
    type Error = OracleError;

    fn label(&self, text: &str, _tokens: &[Token]) -> Result<Vec<LabeledSpan>, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if self.errors.contains(text) {
            return Err(OracleError::Scripted(text.to_string()));
        }

        Ok(self
            .responses
            .get(text)
            .unwrap_or(&self.default_spans)
            .clone())
    }
}
