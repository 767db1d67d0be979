//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use bri_domain::{detokenize, Entry, ReviewFields, Token};
use bri_tally::Diagnostics;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest review text shown in an entry table cell
const REVIEW_PREVIEW_CHARS: usize = 48;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format tokens.
    pub fn format_tokens(&self, tokens: &[Token]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(tokens)?),
            OutputFormat::Quiet => Ok(detokenize(tokens)),
            OutputFormat::Table => {
                if tokens.is_empty() {
                    return Ok(self.colorize("No tokens.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Text", "Start", "Space after"]);
                for token in tokens {
                    builder.push_record([
                        token.text.clone(),
                        token.start_position.to_string(),
                        token.whitespace_after.to_string(),
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format parsed review records.
    pub fn format_reviews(&self, reviews: &[ReviewFields]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(reviews)?),
            OutputFormat::Quiet => Ok(reviews
                .iter()
                .filter_map(|r| r.journal.as_deref())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if reviews.is_empty() {
                    return Ok(self.colorize("No reviews found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["#", "Journal"]);
                for (i, review) in reviews.iter().enumerate() {
                    builder.push_record([
                        (i + 1).to_string(),
                        review.journal.clone().unwrap_or_default(),
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format extracted entries.
    pub fn format_entries(&self, entries: &[Entry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            OutputFormat::Quiet => Ok(entries
                .iter()
                .map(|e| format!("{}\t{}", e.author(), e.title()))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize("No entries found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Author", "Title", "Reviews", "Span"]);
                for entry in entries {
                    builder.push_record([
                        entry.author(),
                        entry.title(),
                        preview(&entry.review_text(), REVIEW_PREVIEW_CHARS),
                        format!("{}..{}", entry.start_pos, entry.end_pos),
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format the diagnostics report of a counting run.
    pub fn format_diagnostics(&self, diagnostics: &Diagnostics, top: usize) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(diagnostics)?),
            OutputFormat::Quiet => Ok(diagnostics
                .most_frequent(top)
                .iter()
                .map(|(tag, count)| format!("{}\t{}", tag, count))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => Ok(diagnostics.summary(top)),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut)
}
