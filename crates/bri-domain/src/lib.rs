//! BRI Domain Layer
//!
//! Core types and trait seams for turning OCR-scanned Book Review Index text
//! into structured review records. Everything here is pure logic: no I/O, no
//! model runtime, no logging.
//!
//! ## Key Concepts
//!
//! - **Token**: a position-tagged run of text produced by a [`Tokenizer`]
//! - **FieldTag**: the label an oracle assigns to a span (author, title, journal, ...)
//! - **LabeledSpan**: a labeled, offset-located run of text
//! - **Entry**: one logical index record (authors, titles, raw reviews)
//! - **ReviewFields**: the fields of a single review (journal, volume, date, page, length)
//!
//! ## Architecture
//!
//! The statistical labeling model lives outside this workspace and is reached
//! only through the [`LabelOracle`] trait, so every algorithm that consumes
//! labels can be driven by a deterministic fake.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entry;
pub mod field;
pub mod token;
pub mod tokenizer;
pub mod traits;

// Re-exports for convenience
pub use entry::{Entry, ReviewFields};
pub use field::{FieldTag, LabeledSpan};
pub use token::{detokenize, Token};
pub use tokenizer::{ExtractTokenizer, ReviewTokenizer, NEWLINE_TOKEN};
pub use traits::{LabelOracle, Tokenizer};
