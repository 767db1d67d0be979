//! Progress and intermediate types for extraction

use bri_domain::Entry;

/// Progress through one source text, reported after every window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionProgress {
    /// Bytes of source text whose entries are settled
    pub processed: usize,

    /// Total source length in bytes
    pub total: usize,

    /// Entries emitted so far
    pub entries: usize,
}

impl ExtractionProgress {
    /// Fraction of the source processed, in `[0.0, 1.0]`
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.processed as f64 / self.total as f64
    }

    /// Percentage of the source processed, rounded to three decimals
    pub fn percent(&self) -> f64 {
        (self.fraction() * 100_000.0).round() / 1_000.0
    }
}

/// Entries assembled from one window's spans
#[derive(Debug, Clone, Default)]
pub(crate) struct ChunkEntries {
    /// Entries closed by a following Author or Title span
    pub finalized: Vec<Entry>,

    /// The entry still open when the spans ran out
    pub current: Entry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_fraction() {
        let progress = ExtractionProgress { processed: 250, total: 1_000, entries: 3 };
        assert!((progress.fraction() - 0.25).abs() < f64::EPSILON);
        assert!((progress.percent() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress_of_empty_text_is_complete() {
        let progress = ExtractionProgress { processed: 0, total: 0, entries: 0 };
        assert_eq!(progress.fraction(), 1.0);
    }
}
