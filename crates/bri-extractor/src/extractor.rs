//! Core Extractor implementation
//!
//! Drives the extraction tokenizer and a label oracle over arbitrarily long
//! index text in bounded windows, and reassembles complete entries even when
//! an entry straddles a window boundary.

use crate::chunking::ChunkWindow;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::types::{ChunkEntries, ExtractionProgress};
use bri_domain::{Entry, ExtractTokenizer, LabelOracle, LabeledSpan, Tokenizer};
use std::fmt::Display;
use tracing::{debug, info};

/// The Extractor turns raw OCR index text into [`Entry`] records
///
/// Only the oracle is pluggable; everything else is deterministic.
pub struct Extractor<O>
where
    O: LabelOracle,
{
    oracle: O,
    tokenizer: ExtractTokenizer,
    config: ExtractorConfig,
}

impl<O> Extractor<O>
where
    O: LabelOracle,
    O::Error: Display,
{
    /// Create a new Extractor
    ///
    /// # Errors
    ///
    /// Returns `ExtractorError::Config` if the configuration is invalid.
    pub fn new(oracle: O, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self {
            oracle,
            tokenizer: ExtractTokenizer,
            config,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract entries from `text`
    pub fn extract(&self, text: &str) -> Result<Vec<Entry>, ExtractorError> {
        self.extract_with_progress(text, |_| {})
    }

    /// Extract entries from `text`, calling `on_progress` after every window
    ///
    /// Every non-final window drops its last finalized entry, because the
    /// oracle labeled it without trailing context, and the next window
    /// starts at that entry's start so it is labeled again in full. On the
    /// final window the still-open entry is emitted as well.
    ///
    /// # Errors
    ///
    /// - `ExtractorError::Oracle` if the oracle fails on any window
    /// - `ExtractorError::ChunkTooSmall` if a non-final window finalizes
    ///   fewer than two entries
    pub fn extract_with_progress<F>(
        &self,
        text: &str,
        mut on_progress: F,
    ) -> Result<Vec<Entry>, ExtractorError>
    where
        F: FnMut(&ExtractionProgress),
    {
        let total = text.len();
        let mut entries = Vec::new();
        let mut chunk_start = 0;

        info!("Starting extraction over {} bytes, window {}", total, self.config.chunk_size);

        loop {
            let window = ChunkWindow::at(text, chunk_start, self.config.chunk_size);
            let spans = self.label_window(window.slice(text))?;
            debug!(
                "Window {}..{} produced {} spans (final: {})",
                window.start,
                window.end,
                spans.len(),
                window.is_final
            );

            let ChunkEntries { mut finalized, mut current } =
                assemble_entries(&spans, window.start, text);

            if window.is_final {
                if !current.is_empty() {
                    current.finalize(text);
                    finalized.push(current);
                }
                entries.extend(finalized);
                self.report(&mut on_progress, total, total, entries.len());
                break;
            }

            let finalized_count = finalized.len();
            let rewind = match finalized.pop() {
                Some(dropped) if finalized_count >= 2 && dropped.start_pos > window.start => dropped,
                _ => {
                    return Err(ExtractorError::ChunkTooSmall {
                        offset: window.start,
                        chunk_size: self.config.chunk_size,
                        finalized: finalized_count,
                    })
                }
            };

            chunk_start = rewind.start_pos;
            entries.extend(finalized);
            self.report(&mut on_progress, chunk_start, total, entries.len());
        }

        info!("Extraction complete: {} entries", entries.len());
        Ok(entries)
    }

    fn label_window(&self, chunk: &str) -> Result<Vec<LabeledSpan>, ExtractorError> {
        let tokens = self.tokenizer.tokenize(chunk);
        let spans = self
            .oracle
            .label(chunk, &tokens)
            .map_err(|e| ExtractorError::Oracle(e.to_string()))?;
        check_spans(chunk, &spans)?;
        Ok(spans)
    }

    fn report<F>(&self, on_progress: &mut F, processed: usize, total: usize, entries: usize)
    where
        F: FnMut(&ExtractionProgress),
    {
        let progress = ExtractionProgress { processed, total, entries };
        if self.config.report_progress {
            info!(
                "Extracted {} books. {}% of text parsed.",
                progress.entries,
                progress.percent()
            );
        }
        on_progress(&progress);
    }
}

/// Reject spans that fall outside `chunk`, split a character, or go backwards
fn check_spans(chunk: &str, spans: &[LabeledSpan]) -> Result<(), ExtractorError> {
    let mut previous_start = 0;
    for span in spans {
        let (start, end) = (span.start_pos, span.end_pos);
        if start > end || end > chunk.len() {
            return Err(ExtractorError::Oracle(format!(
                "span {}..{} lies outside the {}-byte window",
                start,
                end,
                chunk.len()
            )));
        }
        if !chunk.is_char_boundary(start) || !chunk.is_char_boundary(end) {
            return Err(ExtractorError::Oracle(format!(
                "span {}..{} splits a character",
                start, end
            )));
        }
        if start < previous_start {
            return Err(ExtractorError::Oracle(format!(
                "span {}..{} starts before the previous span at {}",
                start, end, previous_start
            )));
        }
        previous_start = start;
    }
    Ok(())
}

/// Group one window's spans into entries
///
/// `offset` is the window's absolute start; spans are window-local and are
/// moved to absolute offsets before they are stored. A span labeled Author
/// or Title closes the open entry once that entry holds a review.
pub(crate) fn assemble_entries(spans: &[LabeledSpan], offset: usize, source: &str) -> ChunkEntries {
    let mut finalized = Vec::new();
    let mut current = Entry::new(offset);

    for span in spans {
        let span = span.shifted(offset);
        if current.has_reviews() && span.label.is_header() {
            current.finalize(source);
            let next = Entry::new(span.start_pos);
            finalized.push(std::mem::replace(&mut current, next));
        }
        current.add_span(&span);
    }

    ChunkEntries { finalized, current }
}
