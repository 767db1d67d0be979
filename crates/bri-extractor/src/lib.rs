//! BRI Extractor
//!
//! Turns raw OCR'd Book Review Index text into entry records and review
//! strings into per-review field records.
//!
//! # Overview
//!
//! Index text arrives as one long run of entries: author, title, then one
//! or more reviews. A label oracle assigns field labels, but it can only
//! look at a bounded window at a time, so the [`Extractor`] walks the text
//! in windows and rewinds at every boundary so that no entry is built
//! without its trailing context.
//!
//! # Architecture
//!
//! ```text
//! Text → ExtractTokenizer → LabelOracle → Extractor → Entry
//! Review → ReviewSegmenter (TaggedReviewParser | RegexSegmenter) → ReviewFields
//! ```
//!
//! # Key Features
//!
//! - **Chunked Extraction**: Bounded oracle windows with boundary rewind
//! - **Chunk Invariance**: Same entries regardless of window size, for a
//!   content-deterministic oracle
//! - **Regex Fallback**: Journal recovery without an oracle
//! - **Progress Reporting**: Per-window callback and log line
//!
//! # Example Usage
//!
//! ```
//! use bri_domain::FieldTag;
//! use bri_extractor::{Extractor, ExtractorConfig};
//! use bri_oracle::PatternOracle;
//!
//! let oracle = PatternOracle::new()
//!     .with_rule(r"^@", FieldTag::Author)?
//!     .with_rule(r"^#", FieldTag::Title)?
//!     .with_fallback(FieldTag::Review);
//!
//! let extractor = Extractor::new(oracle, ExtractorConfig::default())?;
//! let entries = extractor.extract("@Smith #Rivers Choice - p690\n@Jones #Hills LJ - p45")?;
//!
//! assert_eq!(entries.len(), 2);
//! assert_eq!(entries[1].author(), "@Jones");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod types;
mod chunking;
mod extractor;
mod segmenter;
mod review_parser;


pub use error::ExtractorError;
pub use config::{ExtractorConfig, DEFAULT_CHUNK_SIZE};
pub use types::ExtractionProgress;
pub use chunking::ChunkWindow;
pub use extractor::Extractor;
pub use segmenter::RegexSegmenter;
pub use review_parser::{group_reviews, ReviewParser, ReviewSegmenter, TaggedReviewParser};
