//! CLI command implementations
//!
//! Each command has a thin wrapper bound to stdin/stdout and a `*_with`
//! variant generic over reader and writer, which is what the tests drive.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use serde_json::Value;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_document, write_error, write_line, write_response};
use crate::observability::{log_event_with_fields, Event, Logger, MapMetrics, MetricsSnapshot};
use crate::query_server::{input_lines, OnMapError, ViewServer};
use crate::view::{RecentPostsView, ViewError};

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Map { config } => map(config.as_deref()),
        Command::Batch { config, input } => batch(config.as_deref(), input.as_deref()),
        Command::Serve { config } => serve(config.as_deref()),
    }
}

/// Load config and apply its log level
pub fn load_config(path: Option<&Path>) -> CliResult<Config> {
    let config = Config::resolve(path)?;
    Logger::set_threshold(config.severity()?);

    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<defaults>".to_string());
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("author_fallback", config.author_fallback.as_str()),
            ("log_level", config.log_level.as_str()),
            ("on_map_error", config.on_map_error.as_str()),
            ("source", source.as_str()),
        ],
    );
    Ok(config)
}

/// Map one document from stdin
pub fn map(config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    map_with(&config, stdin.lock(), &mut stdout.lock())
}

/// Map one document.
///
/// Writes the row (or `null` for a non-qualifying document) in an `ok`
/// envelope. A mapping failure is written as an `error` envelope and also
/// returned.
pub fn map_with<R: BufRead, W: Write>(config: &Config, input: R, output: &mut W) -> CliResult<()> {
    let doc = read_document(input)?;
    let view = RecentPostsView::new(config.author_fallback);

    match view.map_document(&doc) {
        Ok(Some(emission)) => write_response(output, serde_json::to_value(&emission)?),
        Ok(None) => write_response(output, Value::Null),
        Err(e) => {
            log_failure(&e, None);
            let err = CliError::from(e);
            write_error(output, err.code_str(), err.message())?;
            Err(err)
        }
    }
}

/// Map a JSON-lines file, or stdin when no input is given
pub fn batch(config_path: Option<&Path>, input: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match input {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                CliError::io_error(format!("Failed to open {}: {}", path.display(), e))
            })?;
            batch_with(&config, BufReader::new(file), &mut out)?;
        }
        None => {
            let stdin = io::stdin();
            batch_with(&config, stdin.lock(), &mut out)?;
        }
    }
    Ok(())
}

/// Map every line of `input`, writing one `[key, value]` row per emitting
/// document.
///
/// Lines that are not UTF-8 or not JSON, and documents that fail to map, are
/// logged and counted. With `on_map_error = "abort"` the first one ends the
/// batch with an error.
pub fn batch_with<R: BufRead, W: Write>(
    config: &Config,
    input: R,
    output: &mut W,
) -> CliResult<MetricsSnapshot> {
    let view = RecentPostsView::new(config.author_fallback);
    let metrics = MapMetrics::new();
    log_event_with_fields(
        Event::BatchStart,
        &[("author_fallback", config.author_fallback.as_str())],
    );

    for (index, line) in input_lines(input).enumerate() {
        let line_no = index + 1;
        let parsed = match line? {
            Ok(text) if text.trim().is_empty() => continue,
            Ok(text) => serde_json::from_str::<Value>(&text).map_err(|e| e.to_string()),
            Err(e) => Err(format!("invalid UTF-8: {}", e)),
        };

        let doc = match parsed {
            Ok(doc) => doc,
            Err(e) => {
                metrics.record_failed();
                let reason = format!("line {}: {}", line_no, e);
                log_event_with_fields(Event::DocumentFailed, &[("reason", reason.as_str())]);
                if config.on_map_error == OnMapError::Abort {
                    return Err(CliError::bad_input(reason));
                }
                continue;
            }
        };

        match view.map_document(&doc) {
            Ok(Some(emission)) => {
                write_line(output, &emission)?;
                metrics.record_mapped(1);
            }
            Ok(None) => metrics.record_mapped(0),
            Err(e) => {
                metrics.record_failed();
                log_failure(&e, Some(line_no));
                if config.on_map_error == OnMapError::Abort {
                    return Err(CliError::map_failed_at(line_no, &e));
                }
            }
        }
    }

    output.flush()?;
    let snapshot = metrics.snapshot();
    let fields = snapshot.fields();
    let refs: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
    log_event_with_fields(Event::BatchComplete, &refs);
    Ok(snapshot)
}

/// Serve the query server protocol on stdin/stdout
pub fn serve(config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut server = ViewServer::new(config.author_fallback, config.on_map_error);
    server.run(stdin.lock(), stdout.lock())?;
    Ok(())
}

fn log_failure(err: &ViewError, line: Option<usize>) {
    let line = line.map(|n| n.to_string()).unwrap_or_default();
    let reason = err.message();
    log_event_with_fields(
        Event::DocumentFailed,
        &[
            ("code", err.code().code()),
            ("doc_id", err.doc_id().unwrap_or("")),
            ("line", line.as_str()),
            ("reason", reason.as_str()),
        ],
    );
}
