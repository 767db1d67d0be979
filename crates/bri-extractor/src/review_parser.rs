//! Review string parsing
//!
//! A review string from an index entry holds one or more reviews run
//! together. [`ReviewSegmenter`] turns it into [`ReviewFields`] records.
//! Two mechanisms are available: the oracle-backed [`TaggedReviewParser`],
//! which recovers all seven fields, and the [`RegexSegmenter`] fallback,
//! which recovers only journals.

use crate::error::ExtractorError;
use crate::segmenter::RegexSegmenter;
use bri_domain::{LabelOracle, LabeledSpan, ReviewFields, ReviewTokenizer, Tokenizer};
use std::convert::Infallible;
use std::fmt::Display;
use tracing::debug;

/// Splits a review string into per-review field records
pub trait ReviewSegmenter {
    /// Error type for a failed parse
    type Error;

    /// Parse `review` into records, in source order
    fn parse_review(&self, review: &str) -> Result<Vec<ReviewFields>, Self::Error>;

    /// Journal of every parsed review that has one
    fn journals(&self, review: &str) -> Result<Vec<String>, Self::Error> {
        Ok(self
            .parse_review(review)?
            .into_iter()
            .filter_map(|fields| fields.journal)
            .collect())
    }
}

impl ReviewSegmenter for RegexSegmenter {
    type Error = Infallible;

    fn parse_review(&self, review: &str) -> Result<Vec<ReviewFields>, Self::Error> {
        Ok(self.segment(review))
    }
}

impl<S: ReviewSegmenter> ReviewSegmenter for &S {
    type Error = S::Error;

    fn parse_review(&self, review: &str) -> Result<Vec<ReviewFields>, Self::Error> {
        (*self).parse_review(review)
    }
}

/// Oracle-backed review parser
///
/// Tokenizes with [`ReviewTokenizer`], asks the oracle for field labels and
/// groups the labeled spans with [`group_reviews`].
pub struct TaggedReviewParser<O> {
    oracle: O,
    tokenizer: ReviewTokenizer,
}

impl<O> TaggedReviewParser<O>
where
    O: LabelOracle,
    O::Error: Display,
{
    /// Create a parser around `oracle`
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            tokenizer: ReviewTokenizer,
        }
    }
}

impl<O> ReviewSegmenter for TaggedReviewParser<O>
where
    O: LabelOracle,
    O::Error: Display,
{
    type Error = ExtractorError;

    fn parse_review(&self, review: &str) -> Result<Vec<ReviewFields>, Self::Error> {
        let tokens = self.tokenizer.tokenize(review);
        let spans = self
            .oracle
            .label(review, &tokens)
            .map_err(|e| ExtractorError::Oracle(e.to_string()))?;
        Ok(group_reviews(&spans))
    }
}

/// Group labeled field spans into review records
///
/// Each review carries at most one value per field, so a span whose field
/// is already set in the open record starts the next record. Spans that are
/// not review fields are skipped.
pub fn group_reviews(spans: &[LabeledSpan]) -> Vec<ReviewFields> {
    let mut reviews = Vec::new();
    let mut current = ReviewFields::default();

    for span in spans {
        if !span.label.is_review_field() {
            debug!("Skipping {} span '{}' inside review text", span.label, span.text);
            continue;
        }
        if current.has(span.label) {
            reviews.push(std::mem::take(&mut current));
        }
        current.set(span.label, span.text.as_str());
    }

    if !current.is_empty() {
        reviews.push(current);
    }
    reviews
}

/// Either review parsing mechanism, chosen at run time
///
/// The CLI picks `Tagged` when an oracle endpoint is configured and
/// `Regex` otherwise.
pub enum ReviewParser<O> {
    /// Oracle-backed, all fields
    Tagged(TaggedReviewParser<O>),
    /// Regex fallback, journals only
    Regex(RegexSegmenter),
}

impl<O> ReviewParser<O>
where
    O: LabelOracle,
    O::Error: Display,
{
    /// Oracle-backed parser when `oracle` is present, regex fallback otherwise
    pub fn from_oracle(oracle: Option<O>) -> Self {
        match oracle {
            Some(oracle) => Self::Tagged(TaggedReviewParser::new(oracle)),
            None => Self::Regex(RegexSegmenter),
        }
    }

    /// Whether this parser consults an oracle
    pub fn is_tagged(&self) -> bool {
        matches!(self, Self::Tagged(_))
    }
}

impl<O> ReviewSegmenter for ReviewParser<O>
where
    O: LabelOracle,
    O::Error: Display,
{
    type Error = ExtractorError;

    fn parse_review(&self, review: &str) -> Result<Vec<ReviewFields>, Self::Error> {
        match self {
            Self::Tagged(parser) => parser.parse_review(review),
            Self::Regex(segmenter) => Ok(segmenter.segment(review)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bri_domain::FieldTag;
    use bri_oracle::{OracleError, PatternOracle, ScriptedOracle};

    fn field(label: FieldTag, text: &str) -> LabeledSpan {
        LabeledSpan::new(label, text, 0, text.len())
    }

    fn field_oracle() -> PatternOracle {
        PatternOracle::new()
            .with_rule(r"^v\d+$", FieldTag::Volume)
            .unwrap()
            .with_rule(r"^p\d+$", FieldTag::Page)
            .unwrap()
            .with_rule(r"^\d{2}$", FieldTag::Year)
            .unwrap()
            .with_rule(r"^(Ja|F|Mr|Ap|My|Je|Jl|Ag|S|O|N|D)$", FieldTag::Month)
            .unwrap()
            .with_rule(r"^[A-Z][A-Za-z]+$|^[A-Z]{2,}$", FieldTag::Journal)
            .unwrap()
    }

    #[test]
    fn test_group_starts_new_record_on_repeated_field() {
        let spans = vec![
            field(FieldTag::Journal, "Choice"),
            field(FieldTag::Volume, "v35"),
            field(FieldTag::Page, "p690"),
            field(FieldTag::Journal, "LJ"),
            field(FieldTag::Page, "p45"),
        ];

        let reviews = group_reviews(&spans);
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].journal.as_deref(), Some("Choice"));
        assert_eq!(reviews[0].volume.as_deref(), Some("v35"));
        assert_eq!(reviews[1].journal.as_deref(), Some("LJ"));
        assert_eq!(reviews[1].page.as_deref(), Some("p45"));
        assert!(reviews[1].volume.is_none());
    }

    #[test]
    fn test_group_skips_non_field_labels() {
        let spans = vec![
            field(FieldTag::Author, "Smith, J"),
            field(FieldTag::Journal, "Choice"),
            field(FieldTag::Review, "- v35 -"),
        ];

        let reviews = group_reviews(&spans);
        assert_eq!(reviews, vec![ReviewFields::journal_only("Choice")]);
    }

    #[test]
    fn test_group_of_nothing_is_empty() {
        assert!(group_reviews(&[]).is_empty());
        assert!(group_reviews(&[field(FieldTag::Title, "Rivers")]).is_empty());
    }

    #[test]
    fn test_tagged_parser_recovers_all_fields() {
        let parser = TaggedReviewParser::new(field_oracle());
        let reviews = parser
            .parse_review("Choice - v35 - D '97 - p690 - LJ - v122 - Ja '97 - p45")
            .unwrap();

        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].journal.as_deref(), Some("Choice"));
        assert_eq!(reviews[0].month.as_deref(), Some("D"));
        assert_eq!(reviews[0].year.as_deref(), Some("97"));
        assert_eq!(reviews[0].page.as_deref(), Some("p690"));
        assert_eq!(reviews[1].journal.as_deref(), Some("LJ"));
        assert_eq!(reviews[1].volume.as_deref(), Some("v122"));
        assert_eq!(reviews[1].month.as_deref(), Some("Ja"));
    }

    #[test]
    fn test_tagged_parser_propagates_oracle_failure() {
        let mut oracle = ScriptedOracle::default();
        oracle.add_error("Choice - v35");
        let parser = TaggedReviewParser::new(oracle);

        let result = parser.parse_review("Choice - v35");
        assert!(matches!(result, Err(ExtractorError::Oracle(_))));
    }

    #[test]
    fn test_regex_segmenter_as_review_segmenter() {
        let journals = ReviewSegmenter::journals(
            &RegexSegmenter,
            "Choice - v35 - D '97 - p690 - LJ - v122 - Ja '97 - p45 ",
        )
        .unwrap();
        assert_eq!(journals, vec!["Choice", "LJ"]);
    }

    #[test]
    fn test_review_parser_falls_back_to_regex() {
        let parser: ReviewParser<ScriptedOracle> = ReviewParser::from_oracle(None);
        assert!(!parser.is_tagged());
        assert_eq!(
            parser.journals("Choice - v35 - p690 ").unwrap(),
            vec!["Choice"]
        );
    }

    #[test]
    fn test_review_parser_uses_oracle_when_present() {
        let oracle = ScriptedOracle::new(vec![field(FieldTag::Journal, "KR")]);
        let parser = ReviewParser::from_oracle(Some(oracle));
        assert!(parser.is_tagged());
        assert_eq!(parser.journals("anything").unwrap(), vec!["KR"]);
    }

    #[test]
    fn test_scripted_oracle_error_is_wrapped() {
        let err = ExtractorError::Oracle(OracleError::Scripted("x".into()).to_string());
        assert!(err.to_string().starts_with("Oracle error"));
    }
}
