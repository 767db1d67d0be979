//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Label oracle failure; fatal for the current input
    #[error("Oracle error: {0}")]
    Oracle(String),

    /// A non-final window finished fewer than two entries, so there is no
    /// safe point to re-anchor the next window
    #[error(
        "Chunk too small: window at offset {offset} ({chunk_size} bytes) finalized {finalized} \
         entries, at least 2 are needed to re-anchor"
    )]
    ChunkTooSmall {
        /// Absolute offset of the window that could not be re-anchored
        offset: usize,
        /// Configured window size
        chunk_size: usize,
        /// Entries the window finalized
        finalized: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
