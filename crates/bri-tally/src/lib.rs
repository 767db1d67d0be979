//! BRI Tally
//!
//! Tag normalization and review counting.
//!
//! # Overview
//!
//! Journals appear in the index as short, often OCR-damaged abbreviations.
//! [`TagMap`] resolves them to canonical titles; [`ReviewAggregator`] walks
//! the input rows and builds per-book counts, from which per-author counts
//! are derived. Anything that fails to resolve is tallied in
//! [`Diagnostics`] rather than failing the batch.
//!
//! # Architecture
//!
//! ```text
//! RawRow → validate → ReviewSegmenter → journal tags → TagMap → BookTable → AuthorTable
//!                                                        ↘ Diagnostics
//! ```

#![warn(missing_docs)]

mod aggregate;
mod diagnostics;
mod error;
mod rows;
mod table;
mod tag_map;

pub use aggregate::{ReviewAggregator, ReviewCounts};
pub use diagnostics::{Diagnostics, RejectedRow};
pub use error::TallyError;
pub use rows::{RawRow, ReviewRow};
pub use table::{AuthorTable, BookKey, BookTable, CountTable, BOOK_KEY_SEPARATOR};
pub use tag_map::{TagMap, TagRow};
