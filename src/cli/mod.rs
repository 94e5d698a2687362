//! CLI module for feedview
//!
//! Provides command-line interface for:
//! - map: one document from stdin
//! - batch: JSON-lines documents to JSON-lines rows
//! - serve: query server protocol loop

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{batch, batch_with, load_config, map, map_with, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_document, write_error, write_line, write_response};
