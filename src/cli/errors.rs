//! CLI-specific error types

use std::fmt;
use std::io;

use crate::view::ViewError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout/input file)
    IoError,
    /// Input is not a JSON document
    BadInput,
    /// A qualifying document could not be mapped
    MapFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "FEEDVIEW_CLI_CONFIG_ERROR",
            Self::IoError => "FEEDVIEW_CLI_IO_ERROR",
            Self::BadInput => "FEEDVIEW_CLI_BAD_INPUT",
            Self::MapFailed => "FEEDVIEW_CLI_MAP_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn bad_input(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BadInput, msg)
    }

    /// Map failure, prefixed with the input line it came from
    pub fn map_failed_at(line: usize, err: &ViewError) -> Self {
        Self::new(CliErrorCode::MapFailed, format!("line {}: {}", line, err))
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            Self::io_error(e.to_string())
        } else {
            Self::bad_input(format!("JSON error: {}", e))
        }
    }
}

impl From<ViewError> for CliError {
    fn from(e: ViewError) -> Self {
        Self::new(CliErrorCode::MapFailed, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
