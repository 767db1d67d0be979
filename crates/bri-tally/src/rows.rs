//! Input rows
//!
//! Raw rows come from the index spreadsheets, one per book, with every
//! review of that book concatenated in a single `Review` cell.

use crate::error::TallyError;
use serde::{Deserialize, Serialize};

/// A row as read from the input file; any column may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    /// Book author
    #[serde(rename = "Author", default)]
    pub author: Option<String>,

    /// Book title
    #[serde(rename = "Title", default)]
    pub title: Option<String>,

    /// Concatenated review string
    #[serde(rename = "Review", default)]
    pub review: Option<String>,
}

impl RawRow {
    /// Convenience constructor with every field present
    pub fn new(author: impl Into<String>, title: impl Into<String>, review: impl Into<String>) -> Self {
        Self {
            author: Some(author.into()),
            title: Some(title.into()),
            review: Some(review.into()),
        }
    }

    /// Check that author, title and review are present and not blank
    ///
    /// `row` is the zero-based data row index, reported on rejection.
    pub fn validate(self, row: usize) -> Result<ReviewRow, TallyError> {
        Ok(ReviewRow {
            author: required(self.author, row, "Author")?,
            title: required(self.title, row, "Title")?,
            review: required(self.review, row, "Review")?,
        })
    }
}

fn required(value: Option<String>, row: usize, field: &'static str) -> Result<String, TallyError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(TallyError::MissingField { row, field }),
    }
}

/// A validated row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    /// Book author
    pub author: String,
    /// Book title
    pub title: String,
    /// Concatenated review string
    pub review: String,
}
