//! Rule-based label oracle
//!
//! Labels each token with the tag of the first rule whose pattern matches the
//! token text, then merges runs of adjacent tokens sharing a label into one
//! span. Newline sentinels and unmatched tokens break runs.
//!
//! Output depends only on token text, never on where a window starts, which
//! makes this oracle a stand-in for the model when checking that chunked
//! extraction agrees with whole-text extraction.

use crate::OracleError;
use bri_domain::{FieldTag, LabelOracle, LabeledSpan, Token, NEWLINE_TOKEN};
use regex::Regex;
use tracing::debug;

/// Regex rule labeler
///
/// # Examples
///
/// ```
/// use bri_domain::{ExtractTokenizer, FieldTag, LabelOracle, Tokenizer};
/// use bri_oracle::PatternOracle;
///
/// let oracle = PatternOracle::new()
///     .with_rule(r"^@", FieldTag::Author)
///     .unwrap()
///     .with_fallback(FieldTag::Review);
///
/// let text = "@Smith Choice - v35";
/// let spans = oracle.label(text, &ExtractTokenizer.tokenize(text)).unwrap();
/// assert_eq!(spans[0].label, FieldTag::Author);
/// assert_eq!(spans[1].text, "Choice - v35");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PatternOracle {
    rules: Vec<(Regex, FieldTag)>,
    fallback: Option<FieldTag>,
}

impl PatternOracle {
    /// Create an oracle with no rules; every token is unlabeled
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule; earlier rules win
    pub fn with_rule(mut self, pattern: &str, tag: FieldTag) -> Result<Self, OracleError> {
        let regex = Regex::new(pattern)
            .map_err(|e| OracleError::Config(format!("Invalid rule pattern '{}': {}", pattern, e)))?;
        self.rules.push((regex, tag));
        Ok(self)
    }

    /// Label for tokens no rule matches
    pub fn with_fallback(mut self, tag: FieldTag) -> Self {
        self.fallback = Some(tag);
        self
    }

    fn classify(&self, token: &Token) -> Option<FieldTag> {
        if token.text == NEWLINE_TOKEN {
            return None;
        }
        self.rules
            .iter()
            .find(|(regex, _)| regex.is_match(&token.text))
            .map(|(_, tag)| *tag)
            .or(self.fallback)
    }
}

impl LabelOracle for PatternOracle {
    type Error = OracleError;

    fn label(&self, text: &str, tokens: &[Token]) -> Result<Vec<LabeledSpan>, Self::Error> {
        let mut spans = Vec::new();
        // (label, start, end) of the run being built
        let mut run: Option<(FieldTag, usize, usize)> = None;

        for token in tokens {
            let label = self.classify(token);
            match (run, label) {
                (Some((current, start, _)), Some(tag)) if current == tag => {
                    run = Some((current, start, token.end_position()));
                }
                (previous, next) => {
                    if let Some(finished) = previous {
                        spans.push(close_run(text, finished)?);
                    }
                    run = next.map(|tag| (tag, token.start_position, token.end_position()));
                }
            }
        }

        if let Some(finished) = run {
            spans.push(close_run(text, finished)?);
        }

        debug!("Pattern oracle labeled {} tokens into {} spans", tokens.len(), spans.len());
        Ok(spans)
    }
}

fn close_run(text: &str, (label, start, end): (FieldTag, usize, usize)) -> Result<LabeledSpan, OracleError> {
    let slice = text.get(start..end).ok_or_else(|| {
        OracleError::InvalidResponse(format!(
            "Token offsets {}..{} do not fit the {}-byte window",
            start,
            end,
            text.len()
        ))
    })?;
    Ok(LabeledSpan::new(label, slice, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bri_domain::{ExtractTokenizer, ReviewTokenizer, Tokenizer};

    fn index_oracle() -> PatternOracle {
        PatternOracle::new()
            .with_rule(r"^@", FieldTag::Author)
            .unwrap()
            .with_rule(r"^#", FieldTag::Title)
            .unwrap()
            .with_fallback(FieldTag::Review)
    }

    #[test]
    fn test_runs_merge_into_spans() {
        let text = "@Smith, @John #Rivers #Run Choice - v35 - p690";
        let spans = index_oracle().label(text, &ExtractTokenizer.tokenize(text)).unwrap();

        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0], LabeledSpan::new(FieldTag::Author, "@Smith, @John", 0, 13));
        assert_eq!(spans[1], LabeledSpan::new(FieldTag::Title, "#Rivers #Run", 14, 26));
        assert_eq!(spans[2].label, FieldTag::Review);
        assert_eq!(spans[2].text, "Choice - v35 - p690");
        assert_eq!(spans[2].end_pos, text.len());
    }

    #[test]
    fn test_newline_breaks_runs() {
        let text = "Choice\nLJ";
        let spans = index_oracle().label(text, &ExtractTokenizer.tokenize(text)).unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "Choice");
        assert_eq!(spans[1].text, "LJ");
        assert_eq!(spans[1].start_pos, 7);
    }

    #[test]
    fn test_unmatched_tokens_without_fallback_are_unlabeled() {
        let oracle = PatternOracle::new().with_rule(r"^p\d+$", FieldTag::Page).unwrap();
        let text = "Choice - p690";
        let spans = oracle.label(text, &ReviewTokenizer.tokenize(text)).unwrap();
        assert_eq!(spans, vec![LabeledSpan::new(FieldTag::Page, "p690", 9, 13)]);
    }

    #[test]
    fn test_invalid_rule_is_config_error() {
        let result = PatternOracle::new().with_rule("(unclosed", FieldTag::Author);
        assert!(matches!(result, Err(OracleError::Config(_))));
    }

    #[test]
    fn test_empty_window() {
        let spans = index_oracle().label("", &[]).unwrap();
        assert!(spans.is_empty());
    }
}
