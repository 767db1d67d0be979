//! Review aggregator
//!
//! Counts reviews per book and journal. Each row's review string is split
//! into per-review records by a [`ReviewSegmenter`], every journal tag is
//! resolved through the [`TagMap`], and resolved tags are counted against
//! the row's book.

use crate::diagnostics::Diagnostics;
use crate::rows::{RawRow, ReviewRow};
use crate::table::{AuthorTable, BookKey, BookTable};
use crate::tag_map::TagMap;
use bri_extractor::ReviewSegmenter;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Result of a counting run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewCounts {
    /// Per-book counts
    pub books: BookTable,

    /// Unresolved tags and rejected rows
    pub diagnostics: Diagnostics,
}

impl ReviewCounts {
    /// Per-author counts, derived from the book table
    pub fn authors(&self) -> AuthorTable {
        self.books.to_author_table()
    }

    /// Fold the counts of an independent input into this one
    pub fn merge(&mut self, other: ReviewCounts) {
        self.books.merge(other.books);
        self.diagnostics.merge(other.diagnostics);
    }
}

/// Counts resolved journal reviews per book
///
/// # Examples
///
/// ```
/// use bri_extractor::RegexSegmenter;
/// use bri_tally::{BookKey, RawRow, ReviewAggregator, TagMap};
///
/// let tags = TagMap::build(vec![("Choice", "Choice Magazine")], Vec::<(&str, &str)>::new());
/// let aggregator = ReviewAggregator::new(&tags, RegexSegmenter);
///
/// let rows = vec![
///     RawRow::new("Smith, J", "Rivers", "Choice - v35 - p690 "),
///     RawRow::new("Smith, J", "Rivers", "Choice - v36 - p12 "),
/// ];
/// let counts = aggregator.count(rows).unwrap();
///
/// let key = BookKey::new("Rivers", "Smith, J");
/// assert_eq!(counts.books.count(&key, "Choice Magazine"), 2);
/// ```
pub struct ReviewAggregator<'a, S> {
    tags: &'a TagMap,
    segmenter: S,
}

impl<'a, S> ReviewAggregator<'a, S>
where
    S: ReviewSegmenter,
{
    /// Create an aggregator over a built tag map
    pub fn new(tags: &'a TagMap, segmenter: S) -> Self {
        Self { tags, segmenter }
    }

    /// Count every row
    ///
    /// Rows with missing fields are rejected and recorded in the
    /// diagnostics; unresolved tags are tallied there too. Only a segmenter
    /// failure stops the run.
    pub fn count<I>(&self, rows: I) -> Result<ReviewCounts, S::Error>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut counts = ReviewCounts::default();

        for (index, raw) in rows.into_iter().enumerate() {
            match raw.validate(index) {
                Ok(row) => self.count_row(&row, &mut counts)?,
                Err(e) => {
                    warn!("Skipping row: {}", e);
                    counts.diagnostics.record_rejection(index, &e);
                }
            }
        }

        info!(
            "Counted {} rows into {} books ({} tags resolved, {} unresolved, {} rows rejected)",
            counts.diagnostics.rows_counted,
            counts.books.len(),
            counts.diagnostics.tags_resolved,
            counts.diagnostics.total_unresolved(),
            counts.diagnostics.rejected.len()
        );
        Ok(counts)
    }

    /// Count one validated row into `counts`
    ///
    /// The book gets a row even if none of its tags resolve.
    pub fn count_row(&self, row: &ReviewRow, counts: &mut ReviewCounts) -> Result<(), S::Error> {
        let key = BookKey::new(row.title.as_str(), row.author.as_str());
        counts.books.ensure_row(&key);

        for journal in self.segmenter.journals(row.review.trim())? {
            let tag = strip_range_suffix(&journal);
            if tag.is_empty() {
                continue;
            }
            match self.tags.lookup(tag) {
                Some(title) => {
                    counts.books.increment(&key, title);
                    counts.diagnostics.tags_resolved += 1;
                }
                None => {
                    debug!("Unresolved tag '{}' for {}", tag, key);
                    counts.diagnostics.record_unresolved(tag);
                }
            }
        }

        counts.diagnostics.rows_counted += 1;
        Ok(())
    }
}

/// Text before the first dash, trimmed
fn strip_range_suffix(journal: &str) -> &str {
    journal.split('-').next().unwrap_or_default().trim()
}
