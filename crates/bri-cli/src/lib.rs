//! BRI CLI library.
//!
//! Configuration, file formats, command execution and output formatting for
//! the `bri` command-line tool.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod io;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
