//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::io;
use crate::output::Formatter;
use bri_domain::{Entry, LabelOracle};
use bri_extractor::{Extractor, ExtractorConfig};
use std::fmt::Display;
use tracing::info;

/// Run chunked extraction over `text` with any oracle.
pub fn run_extraction<O>(oracle: O, config: ExtractorConfig, text: &str) -> Result<Vec<Entry>>
where
    O: LabelOracle,
    O::Error: Display,
{
    let extractor = Extractor::new(oracle, config)?;
    Ok(extractor.extract(text)?)
}

/// Execute the extract command.
pub fn execute_extract(
    args: ExtractArgs,
    config: &Config,
    latin1: bool,
    formatter: &Formatter,
) -> Result<()> {
    let oracle = config.oracle(args.oracle_url.as_deref())?.ok_or_else(|| {
        CliError::Config(
            "Extraction needs a tagging service; pass --oracle-url or set oracle.endpoint".into(),
        )
    })?;

    let mut extractor_config = config.extractor.clone();
    if let Some(chunk_size) = args.chunk_size {
        extractor_config = extractor_config.with_chunk_size(chunk_size);
    }

    let text = io::read_text(&args.input, latin1)?;
    info!(
        "Extracting entries from {} via {}",
        args.input.display(),
        oracle.endpoint()
    );

    let entries = run_extraction(oracle, extractor_config, &text)?;
    println!("{}", formatter.format_entries(&entries)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bri_domain::FieldTag;
    use bri_extractor::ExtractorError;
    use bri_oracle::PatternOracle;

    fn oracle() -> PatternOracle {
        PatternOracle::new()
            .with_rule(r"^@", FieldTag::Author)
            .unwrap()
            .with_fallback(FieldTag::Review)
    }

    #[test]
    fn test_run_extraction() {
        let entries = run_extraction(
            oracle(),
            ExtractorConfig::default(),
            "@Smith Choice - p690\n@Jones LJ - p45",
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].authors, vec!["@Jones"]);
    }

    #[test]
    fn test_chunk_too_small_surfaces() {
        let result = run_extraction(
            oracle(),
            ExtractorConfig::default().with_chunk_size(8),
            "@Smith Choice - p690\n@Jones LJ - p45",
        );
        assert!(matches!(
            result,
            Err(CliError::Extractor(ExtractorError::ChunkTooSmall { offset: 0, .. }))
        ));
    }

    #[test]
    fn test_missing_endpoint_is_config_error() {
        let args = ExtractArgs {
            input: "unused.txt".into(),
            chunk_size: None,
            oracle_url: None,
        };
        let formatter = Formatter::new(crate::config::OutputFormat::Quiet, false);
        let result = execute_extract(args, &Config::default(), false, &formatter);
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
