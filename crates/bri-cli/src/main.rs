//! BRI CLI - Parse OCR'd Book Review Index text into review counts.

use bri_cli::commands;
use bri_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> bri_cli::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so table and JSON output stay clean; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Tokenize(args) => commands::execute_tokenize(args, &formatter)?,
        Command::Segment(args) => commands::execute_segment(args, &formatter)?,
        Command::Extract(args) => commands::execute_extract(args, &config, cli.latin1, &formatter)?,
        Command::Fields(args) => commands::execute_fields(args, &config, cli.latin1, &formatter)?,
        Command::Count(args) => commands::execute_count(args, &config, cli.latin1, &formatter)?,
    }

    Ok(())
}
