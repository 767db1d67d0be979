//! Fields command implementation.

use crate::cli::FieldsArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::io::{self, FieldRecord};
use crate::output::Formatter;
use bri_extractor::{ReviewParser, ReviewSegmenter};
use bri_tally::RawRow;
use std::fs::File;
use std::io::BufWriter;
use tracing::{info, warn};

/// Parse every row into one record per review.
///
/// Rows missing a field are skipped with a warning; the second value is
/// how many were skipped.
pub fn parse_fields<S>(rows: Vec<RawRow>, parser: &S) -> Result<(Vec<FieldRecord>, usize)>
where
    S: ReviewSegmenter,
    CliError: From<S::Error>,
{
    let mut records = Vec::new();
    let mut skipped = 0;

    for (index, raw) in rows.into_iter().enumerate() {
        let row = match raw.validate(index) {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping row: {}", e);
                skipped += 1;
                continue;
            }
        };

        for fields in parser.parse_review(row.review.trim())? {
            records.push(FieldRecord {
                author: row.author.clone(),
                title: row.title.clone(),
                fields,
            });
        }

        if (index + 1) % 1000 == 0 {
            info!("Parsed {} rows.", index + 1);
        }
    }

    Ok((records, skipped))
}

/// Execute the fields command.
pub fn execute_fields(
    args: FieldsArgs,
    config: &Config,
    latin1: bool,
    formatter: &Formatter,
) -> Result<()> {
    let parser = ReviewParser::from_oracle(config.oracle(args.oracle_url.as_deref())?);
    if !parser.is_tagged() {
        println!(
            "{}",
            formatter.warning("No tagging service configured; only journals will be filled")
        );
    }

    let rows = io::read_rows(&args.input, latin1)?;
    let (records, skipped) = parse_fields(rows, &parser)?;

    let file = File::create(&args.output)?;
    io::write_fields(BufWriter::new(file), &records)?;

    println!(
        "{}",
        formatter.success(&format!(
            "Wrote {} reviews to {} ({} rows skipped)",
            records.len(),
            args.output.display(),
            skipped
        ))
    );
    Ok(())
}
