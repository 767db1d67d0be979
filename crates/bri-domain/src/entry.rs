//! Entry module - one logical Book Review Index record and its reviews

use crate::field::{FieldTag, LabeledSpan};
use serde::{Deserialize, Serialize};

/// One logical index record: a book's author(s), title(s) and raw reviews
///
/// Author and title spans accumulate because the oracle may split a long
/// name or title into several spans. `reviews` holds raw review text that
/// still needs segmenting and tag normalization.
///
/// Offsets are byte offsets into the full source text once the entry has
/// left the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Entry {
    /// Author spans, in source order
    pub authors: Vec<String>,

    /// Title spans, in source order
    pub titles: Vec<String>,

    /// Review spans, in source order
    pub reviews: Vec<String>,

    /// Start offset of the entry
    pub start_pos: usize,

    /// End offset of the last span added
    pub end_pos: usize,

    /// Source text between `start_pos` and `end_pos`, set on finalization
    pub full_text: String,
}

impl Entry {
    /// Start a new, empty entry anchored at `start_pos`
    ///
    /// Every entry gets its own containers; nothing is shared between
    /// instances.
    pub fn new(start_pos: usize) -> Self {
        Self {
            authors: Vec::new(),
            titles: Vec::new(),
            reviews: Vec::new(),
            start_pos,
            end_pos: start_pos,
            full_text: String::new(),
        }
    }

    /// Append a span's text under its label and extend the entry to the
    /// span's end
    ///
    /// Any label that is not Author or Title is review content.
    pub fn add_span(&mut self, span: &LabeledSpan) {
        match span.label {
            FieldTag::Author => self.authors.push(span.text.clone()),
            FieldTag::Title => self.titles.push(span.text.clone()),
            _ => self.reviews.push(span.text.clone()),
        }
        self.end_pos = span.end_pos;
    }

    /// Whether at least one review span has been added
    pub fn has_reviews(&self) -> bool {
        !self.reviews.is_empty()
    }

    /// Whether no span of any kind has been added
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty() && self.titles.is_empty() && self.reviews.is_empty()
    }

    /// Record the source slice covered by this entry
    ///
    /// Offsets that fall outside `source` or off a character boundary leave
    /// `full_text` empty.
    pub fn finalize(&mut self, source: &str) {
        self.full_text = source
            .get(self.start_pos..self.end_pos)
            .unwrap_or_default()
            .to_string();
    }

    /// Author spans joined with single spaces
    pub fn author(&self) -> String {
        self.authors.join(" ")
    }

    /// Title spans joined with single spaces
    pub fn title(&self) -> String {
        self.titles.join(" ")
    }

    /// Review spans joined with single spaces
    pub fn review_text(&self) -> String {
        self.reviews.join(" ")
    }
}

/// The fields of one review
///
/// Every field is optional: OCR loss and index conventions mean a review may
/// carry anything from a bare journal tag to all seven fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReviewFields {
    /// Journal abbreviation (J)
    pub journal: Option<String>,
    /// Volume (V)
    pub volume: Option<String>,
    /// Month or season (M)
    pub month: Option<String>,
    /// Day (D)
    pub day: Option<String>,
    /// Year (Y)
    pub year: Option<String>,
    /// Page (P)
    pub page: Option<String>,
    /// Length (L)
    pub length: Option<String>,
}

impl ReviewFields {
    /// A review carrying only a journal
    pub fn journal_only(journal: impl Into<String>) -> Self {
        Self {
            journal: Some(journal.into()),
            ..Self::default()
        }
    }

    /// Value of a review field, `None` for absent fields and for Author,
    /// Title and Review
    pub fn get(&self, tag: FieldTag) -> Option<&str> {
        match tag {
            FieldTag::Journal => self.journal.as_deref(),
            FieldTag::Volume => self.volume.as_deref(),
            FieldTag::Month => self.month.as_deref(),
            FieldTag::Day => self.day.as_deref(),
            FieldTag::Year => self.year.as_deref(),
            FieldTag::Page => self.page.as_deref(),
            FieldTag::Length => self.length.as_deref(),
            FieldTag::Author | FieldTag::Title | FieldTag::Review => None,
        }
    }

    /// Set a review field; returns false (and changes nothing) for labels
    /// that are not review fields
    pub fn set(&mut self, tag: FieldTag, value: impl Into<String>) -> bool {
        let slot = match tag {
            FieldTag::Journal => &mut self.journal,
            FieldTag::Volume => &mut self.volume,
            FieldTag::Month => &mut self.month,
            FieldTag::Day => &mut self.day,
            FieldTag::Year => &mut self.year,
            FieldTag::Page => &mut self.page,
            FieldTag::Length => &mut self.length,
            FieldTag::Author | FieldTag::Title | FieldTag::Review => return false,
        };
        *slot = Some(value.into());
        true
    }

    /// Whether a value is present for `tag`
    pub fn has(&self, tag: FieldTag) -> bool {
        self.get(tag).is_some()
    }

    /// Whether no field is present
    pub fn is_empty(&self) -> bool {
        FieldTag::REVIEW_FIELDS.iter().all(|tag| !self.has(*tag))
    }
}
