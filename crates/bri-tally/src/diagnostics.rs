//! Diagnostics collected while counting
//!
//! Unresolved tags are mostly OCR damage; their frequencies point at the
//! next entries worth adding to the OCR-fix source.

use crate::error::TallyError;
use serde::Serialize;
use std::collections::BTreeMap;

/// A row that was skipped, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    /// Zero-based data row index within its input
    pub row: usize,
    /// Why the row was rejected
    pub reason: String,
}

/// Recoverable issues seen during a counting run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    /// Occurrences of each tag that did not resolve
    pub unresolved: BTreeMap<String, usize>,

    /// Rows skipped for missing fields
    pub rejected: Vec<RejectedRow>,

    /// Rows that were counted
    pub rows_counted: usize,

    /// Journal tags that resolved
    pub tags_resolved: usize,
}

impl Diagnostics {
    /// Create empty diagnostics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of an unresolved tag
    pub fn record_unresolved(&mut self, tag: &str) {
        *self.unresolved.entry(tag.to_string()).or_insert(0) += 1;
    }

    /// Record a rejected row
    pub fn record_rejection(&mut self, row: usize, error: &TallyError) {
        self.rejected.push(RejectedRow {
            row,
            reason: error.to_string(),
        });
    }

    /// Total unresolved occurrences across all tags
    pub fn total_unresolved(&self) -> usize {
        self.unresolved.values().sum()
    }

    /// Share of journal tags that resolved, in `[0.0, 1.0]`
    pub fn resolution_rate(&self) -> f64 {
        let seen = self.tags_resolved + self.total_unresolved();
        if seen == 0 {
            return 1.0;
        }
        self.tags_resolved as f64 / seen as f64
    }

    /// The `n` most frequent unresolved tags, most frequent first
    ///
    /// Ties are broken alphabetically.
    pub fn most_frequent(&self, n: usize) -> Vec<(&str, usize)> {
        let mut tags: Vec<(&str, usize)> = self
            .unresolved
            .iter()
            .map(|(tag, count)| (tag.as_str(), *count))
            .collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        tags.truncate(n);
        tags
    }

    /// Fold another run's diagnostics into this one
    pub fn merge(&mut self, other: Diagnostics) {
        for (tag, count) in other.unresolved {
            *self.unresolved.entry(tag).or_insert(0) += count;
        }
        self.rejected.extend(other.rejected);
        self.rows_counted += other.rows_counted;
        self.tags_resolved += other.tags_resolved;
    }

    /// Human-readable report
    pub fn summary(&self, top: usize) -> String {
        let mut lines = vec![
            "Counting Diagnostics".to_string(),
            "====================".to_string(),
            format!("Rows counted: {}", self.rows_counted),
            format!("Rows rejected: {}", self.rejected.len()),
            format!("Tags resolved: {}", self.tags_resolved),
            format!(
                "Tags unresolved: {} ({} distinct)",
                self.total_unresolved(),
                self.unresolved.len()
            ),
            format!("Resolution rate: {:.1}%", self.resolution_rate() * 100.0),
        ];

        if !self.unresolved.is_empty() {
            lines.push(String::new());
            lines.push("Most frequent unresolved tags:".to_string());
            for (tag, count) in self.most_frequent(top) {
                lines.push(format!("  {:>6}  {}", count, tag));
            }
        }

        if !self.rejected.is_empty() {
            lines.push(String::new());
            lines.push("Rejected rows:".to_string());
            for rejected in &self.rejected {
                lines.push(format!("  {}", rejected.reason));
            }
        }

        lines.join("\n")
    }
}
