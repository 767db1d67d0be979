//! Field labels and labeled spans

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The label a field oracle assigns to a span of tokens
///
/// Each tag has a single-letter code used on the wire and in exported
/// table headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldTag {
    /// Book author (A)
    Author,
    /// Book title (T)
    Title,
    /// A whole, not yet segmented review run (R)
    Review,
    /// Journal abbreviation (J)
    Journal,
    /// Volume (V)
    Volume,
    /// Month or season (M)
    Month,
    /// Day of month (D)
    Day,
    /// Year (Y)
    Year,
    /// Page number (P)
    Page,
    /// Review length (L)
    Length,
}

impl FieldTag {
    /// The seven per-review fields, in export column order
    pub const REVIEW_FIELDS: [FieldTag; 7] = [
        FieldTag::Journal,
        FieldTag::Volume,
        FieldTag::Month,
        FieldTag::Day,
        FieldTag::Year,
        FieldTag::Page,
        FieldTag::Length,
    ];

    /// Single-letter code for this tag
    pub fn code(&self) -> char {
        match self {
            FieldTag::Author => 'A',
            FieldTag::Title => 'T',
            FieldTag::Review => 'R',
            FieldTag::Journal => 'J',
            FieldTag::Volume => 'V',
            FieldTag::Month => 'M',
            FieldTag::Day => 'D',
            FieldTag::Year => 'Y',
            FieldTag::Page => 'P',
            FieldTag::Length => 'L',
        }
    }

    /// Look a tag up by its single-letter code
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'A' => Some(FieldTag::Author),
            'T' => Some(FieldTag::Title),
            'R' => Some(FieldTag::Review),
            'J' => Some(FieldTag::Journal),
            'V' => Some(FieldTag::Volume),
            'M' => Some(FieldTag::Month),
            'D' => Some(FieldTag::Day),
            'Y' => Some(FieldTag::Year),
            'P' => Some(FieldTag::Page),
            'L' => Some(FieldTag::Length),
            _ => None,
        }
    }

    /// Author and Title start a new entry; everything else is review content
    pub fn is_header(&self) -> bool {
        matches!(self, FieldTag::Author | FieldTag::Title)
    }

    /// True for the seven fields a single review can carry
    pub fn is_review_field(&self) -> bool {
        Self::REVIEW_FIELDS.contains(self)
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for FieldTag {
    type Err = String;

    /// Accepts either the single-letter code or the variant name
    /// (case-insensitive), e.g. `"J"` or `"journal"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(tag) = FieldTag::from_code(c.to_ascii_uppercase()) {
                return Ok(tag);
            }
        }

        match trimmed.to_lowercase().as_str() {
            "author" => Ok(FieldTag::Author),
            "title" => Ok(FieldTag::Title),
            "review" => Ok(FieldTag::Review),
            "journal" => Ok(FieldTag::Journal),
            "volume" => Ok(FieldTag::Volume),
            "month" => Ok(FieldTag::Month),
            "day" => Ok(FieldTag::Day),
            "year" => Ok(FieldTag::Year),
            "page" => Ok(FieldTag::Page),
            "length" => Ok(FieldTag::Length),
            _ => Err(format!("Unknown field label: '{}'", s)),
        }
    }
}

/// A labeled, offset-located run of text returned by a label oracle
///
/// Offsets are byte offsets relative to the window the oracle processed,
/// with `start_pos <= end_pos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledSpan {
    /// Field label
    pub label: FieldTag,

    /// Span text as reported by the oracle
    pub text: String,

    /// Start offset (inclusive)
    pub start_pos: usize,

    /// End offset (exclusive)
    pub end_pos: usize,
}

impl LabeledSpan {
    /// Create a new labeled span
    pub fn new(label: FieldTag, text: impl Into<String>, start_pos: usize, end_pos: usize) -> Self {
        Self {
            label,
            text: text.into(),
            start_pos,
            end_pos,
        }
    }

    /// Copy of this span with both offsets moved forward by `offset`
    pub fn shifted(&self, offset: usize) -> Self {
        Self {
            label: self.label,
            text: self.text.clone(),
            start_pos: self.start_pos + offset,
            end_pos: self.end_pos + offset,
        }
    }
}
