//! Segment command implementation.

use crate::cli::SegmentArgs;
use crate::error::Result;
use crate::output::Formatter;
use bri_extractor::RegexSegmenter;

/// Execute the segment command.
pub fn execute_segment(args: SegmentArgs, formatter: &Formatter) -> Result<()> {
    let reviews = RegexSegmenter.segment(&args.review);
    println!("{}", formatter.format_reviews(&reviews)?);
    Ok(())
}
