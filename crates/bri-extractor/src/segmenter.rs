//! Regex field segmenter
//!
//! Fallback for review strings when no label oracle is configured. A typical
//! review string holds several reviews run together:
//!
//! ```text
//! Choice - v35 - D '97 - p690 - [51-250] - LJ - v122 - Ja '97 - p45
//! ```
//!
//! Each review ends with a page number, so page markers are used as review
//! boundaries. Only the journal is recovered; volume, date, page and length
//! are left to the oracle path.

use bri_domain::ReviewFields;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Bracketed length or price clause, e.g. `[51-250]` or `(501+)`, with
    /// the OCR confusions I, l and J standing in for digits
    static ref BRACKETED_NUMERIC: Regex = Regex::new(r"[\[(]*[ 0-9\-+IlJ]+[\])]").unwrap();

    /// Review boundary: a dash, then either a page marker or `ONL`
    ///
    /// Page marker: `p`, optional capitals or `i`, digits (or l, O, !, I, i),
    /// optional space and lowercase letter.
    static ref PAGE_BOUNDARY: Regex =
        Regex::new(r"- ?(?:p[A-Zi ]*[ +0-9lO!Ili]+ ?[a-z]?|ONL)").unwrap();
}

/// Leading noise OCR leaves in front of a journal tag
const LEADING_NOISE: [char; 7] = [' ', 't', 'c', 'y', 'x', 'r', '-'];

/// Regex-based review segmenter
///
/// # Examples
///
/// ```
/// use bri_extractor::RegexSegmenter;
///
/// let journals = RegexSegmenter.journals("Choice - v35 - D '97 - p690 - [51-250]");
/// assert_eq!(journals, vec!["Choice"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexSegmenter;

impl RegexSegmenter {
    /// Split a review string into journal-only review records
    pub fn segment(&self, review: &str) -> Vec<ReviewFields> {
        self.journals(review)
            .into_iter()
            .map(ReviewFields::journal_only)
            .collect()
    }

    /// Journal tags of every review in `review`, in order
    pub fn journals(&self, review: &str) -> Vec<String> {
        let cleaned = BRACKETED_NUMERIC.replace_all(review, "");

        PAGE_BOUNDARY
            .split(&cleaned)
            .map(|candidate| candidate.trim_start_matches(LEADING_NOISE))
            .filter(|candidate| !candidate.is_empty())
            .map(journal_of)
            .collect()
    }
}

/// Text before the first dash-space separator, trimmed
fn journal_of(candidate: &str) -> String {
    candidate
        .split("- ")
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}
