//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// BRI - Parse OCR'd Book Review Index text into review counts.
#[derive(Debug, Parser)]
#[command(name = "bri")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "BRI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Decode input files as Latin-1 instead of UTF-8
    #[arg(long, global = true)]
    pub latin1: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (bare values)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Tokenize text and print the tokens
    Tokenize(TokenizeArgs),

    /// Split a review string into journals with the regex segmenter
    Segment(SegmentArgs),

    /// Extract index entries from raw OCR text
    Extract(ExtractArgs),

    /// Export one row per parsed review with its fields
    Fields(FieldsArgs),

    /// Count reviews per book and per author
    Count(CountArgs),
}

/// Arguments for the tokenize command.
#[derive(Debug, Parser)]
pub struct TokenizeArgs {
    /// Text to tokenize
    pub text: String,

    /// Use the extraction tokenizer (newline sentinels, apostrophes kept)
    #[arg(short, long)]
    pub extract: bool,
}

/// Arguments for the segment command.
#[derive(Debug, Parser)]
pub struct SegmentArgs {
    /// Review string, e.g. "Choice - v35 - D '97 - p690"
    pub review: String,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Raw OCR text file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Oracle window size in bytes
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Tagging service URL
    #[arg(long, env = "BRI_ORACLE_URL")]
    pub oracle_url: Option<String>,
}

/// Arguments for the fields command.
#[derive(Debug, Parser)]
pub struct FieldsArgs {
    /// Input rows (CSV, or TSV by extension) with Author, Title and Review columns
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output TSV path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Tagging service URL; without it only journals are recovered
    #[arg(long, env = "BRI_ORACLE_URL")]
    pub oracle_url: Option<String>,
}

/// Arguments for the count command.
#[derive(Debug, Parser)]
pub struct CountArgs {
    /// Primary tag source (TSV with tag and title columns)
    #[arg(long)]
    pub tags: Option<PathBuf>,

    /// OCR-fix tag source (TSV with tag and title columns)
    #[arg(long)]
    pub fixes: Option<PathBuf>,

    /// Input row files; counted in parallel and merged
    #[arg(short, long, required = true, num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// Book-level output TSV
    #[arg(long)]
    pub books: PathBuf,

    /// Author-level output TSV
    #[arg(long)]
    pub authors: PathBuf,

    /// Tagging service URL; without it the regex segmenter is used
    #[arg(long, env = "BRI_ORACLE_URL")]
    pub oracle_url: Option<String>,

    /// Number of unresolved tags to list
    #[arg(long)]
    pub top: Option<usize>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_command() {
        let cli = Cli::parse_from(["bri", "segment", "Choice - v35 - p690"]);
        match cli.command {
            Command::Segment(args) => assert_eq!(args.review, "Choice - v35 - p690"),
            _ => panic!("Expected Segment command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["bri", "tokenize", "a-b", "--extract", "--format", "json", "--latin1"]);
        assert!(cli.latin1);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Tokenize(args) => assert!(args.extract),
            _ => panic!("Expected Tokenize command"),
        }
    }

    #[test]
    fn test_count_takes_several_inputs() {
        let cli = Cli::parse_from([
            "bri", "count", "--input", "a.csv", "b.csv", "--books", "books.tsv", "--authors",
            "authors.tsv",
        ]);
        match cli.command {
            Command::Count(args) => {
                assert_eq!(args.input.len(), 2);
                assert!(args.tags.is_none());
            }
            _ => panic!("Expected Count command"),
        }
    }

    #[test]
    fn test_count_requires_input() {
        let result = Cli::try_parse_from(["bri", "count", "--books", "b.tsv", "--authors", "a.tsv"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_conversion() {
        let format: crate::config::OutputFormat = CliFormat::Quiet.into();
        assert!(matches!(format, crate::config::OutputFormat::Quiet));
    }
}
