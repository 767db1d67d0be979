//! Tokenize command implementation.

use crate::cli::TokenizeArgs;
use crate::error::Result;
use crate::output::Formatter;
use bri_domain::{ExtractTokenizer, ReviewTokenizer, Token, Tokenizer};

/// Tokenize `args.text` with the selected tokenizer.
pub fn tokenize(args: &TokenizeArgs) -> Vec<Token> {
    if args.extract {
        ExtractTokenizer.tokenize(&args.text)
    } else {
        ReviewTokenizer.tokenize(&args.text)
    }
}

/// Execute the tokenize command.
pub fn execute_tokenize(args: TokenizeArgs, formatter: &Formatter) -> Result<()> {
    let tokens = tokenize(&args);
    println!("{}", formatter.format_tokens(&tokens)?);
    Ok(())
}
