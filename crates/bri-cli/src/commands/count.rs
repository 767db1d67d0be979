//! Count command implementation.

use crate::cli::CountArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::io;
use crate::output::Formatter;
use bri_extractor::{ReviewParser, ReviewSegmenter};
use bri_tally::{ReviewAggregator, ReviewCounts, TagMap};
use rayon::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// Load the tag map from its primary and OCR-fix sources.
pub fn load_tags(primary: &Path, fixes: &Path) -> Result<TagMap> {
    let primary_rows = io::read_tag_rows(primary)?;
    let fix_rows = io::read_tag_rows(fixes)?;
    Ok(TagMap::build(primary_rows, fix_rows))
}

/// Count every input file in parallel and merge the results in input order.
///
/// Rejected row numbers in the merged diagnostics are relative to their own file.
pub fn count_inputs<S>(
    inputs: &[PathBuf],
    tags: &TagMap,
    segmenter: &S,
    latin1: bool,
) -> Result<ReviewCounts>
where
    S: ReviewSegmenter + Sync,
    CliError: From<S::Error>,
{
    let aggregator = ReviewAggregator::new(tags, segmenter);

    let per_input = inputs
        .par_iter()
        .map(|path| {
            let rows = io::read_rows(path, latin1)?;
            info!("Counting {} rows from {}", rows.len(), path.display());
            Ok(aggregator.count(rows)?)
        })
        .collect::<Result<Vec<ReviewCounts>>>()?;

    let mut total = ReviewCounts::default();
    for counts in per_input {
        total.merge(counts);
    }
    Ok(total)
}

/// Write the book and author tables.
pub fn write_tables(counts: &ReviewCounts, books: &Path, authors: &Path) -> Result<()> {
    io::write_books(BufWriter::new(File::create(books)?), &counts.books)?;
    io::write_authors(BufWriter::new(File::create(authors)?), &counts.authors())?;
    Ok(())
}

/// Execute the count command.
pub fn execute_count(
    args: CountArgs,
    config: &Config,
    latin1: bool,
    formatter: &Formatter,
) -> Result<()> {
    let primary = Config::tag_source(args.tags, &config.tags.primary, "tags")?;
    let fixes = Config::tag_source(args.fixes, &config.tags.fixes, "fixes")?;
    let tags = load_tags(&primary, &fixes)?;

    let parser = ReviewParser::from_oracle(config.oracle(args.oracle_url.as_deref())?);
    if parser.is_tagged() {
        info!("Segmenting reviews with the tagging service");
    }

    let counts = count_inputs(&args.input, &tags, &parser, latin1)?;
    write_tables(&counts, &args.books, &args.authors)?;

    let top = args.top.unwrap_or(config.settings.top_unresolved);
    println!("{}", formatter.format_diagnostics(&counts.diagnostics, top)?);
    println!(
        "{}",
        formatter.success(&format!(
            "Counted {} books; wrote {} and {}",
            counts.books.len(),
            args.books.display(),
            args.authors.display()
        ))
    );
    Ok(())
}
