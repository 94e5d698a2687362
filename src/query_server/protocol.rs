//! Query server wire protocol
//!
//! One JSON array per request line, one JSON value per reply line:
//!
//! ```text
//! ["reset"]                    -> true
//! ["add_fun", "<source>"]      -> true
//! ["map_doc", {...}]           -> [[[key, value], ...], ...]
//! ```
//!
//! Failures reply `["error", "<type>", "<reason>"]`; diagnostics for the host
//! log are sent as `["log", "<message>"]`.

use std::io::{self, BufRead};
use std::str::Utf8Error;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// A parsed request
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Drop all registered functions
    Reset,
    /// Register a function; the payload is its source text
    AddFun(String),
    /// Run every registered function over one document
    MapDoc(Value),
}

/// Requests that cannot be served
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Request is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("Request must be a non-empty array starting with a command name")]
    NotACommand,

    #[error("Command {0} requires an argument")]
    MissingArgument(&'static str),

    #[error("Command {command} expects {expected}")]
    BadArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

impl ProtocolError {
    /// Error type reported in the `["error", type, reason]` reply
    pub fn error_type(&self) -> &'static str {
        match self {
            ProtocolError::UnknownCommand(_) => "unknown_command",
            _ => "bad_request",
        }
    }

    pub fn to_reply(&self) -> Value {
        error_reply(self.error_type(), &self.to_string())
    }
}

/// What to do when a registered function fails on a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnMapError {
    /// Log the failure, emit no rows for that function, keep going
    #[default]
    Skip,
    /// Stop and report the failure
    Abort,
}

impl OnMapError {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnMapError::Skip => "skip",
            OnMapError::Abort => "abort",
        }
    }
}

impl Request {
    /// Parse one request line
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let value: Value =
            serde_json::from_str(line).map_err(|e| ProtocolError::InvalidJson(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ProtocolError> {
        let Value::Array(mut parts) = value else {
            return Err(ProtocolError::NotACommand);
        };
        if parts.is_empty() {
            return Err(ProtocolError::NotACommand);
        }
        let command = match parts.remove(0) {
            Value::String(s) => s,
            _ => return Err(ProtocolError::NotACommand),
        };
        let mut args = parts.into_iter();

        match command.as_str() {
            "reset" => Ok(Request::Reset),
            "add_fun" => match args.next() {
                Some(Value::String(source)) => Ok(Request::AddFun(source)),
                Some(_) => Err(ProtocolError::BadArgument {
                    command: "add_fun",
                    expected: "a source string",
                }),
                None => Err(ProtocolError::MissingArgument("add_fun")),
            },
            "map_doc" => match args.next() {
                Some(doc) => Ok(Request::MapDoc(doc)),
                None => Err(ProtocolError::MissingArgument("map_doc")),
            },
            _ => Err(ProtocolError::UnknownCommand(command)),
        }
    }
}

/// Newline-delimited input lines, decoded one at a time.
///
/// Unlike `BufRead::lines`, a line that is not UTF-8 comes back as an inner
/// `Err` and reading continues with the next line. The outer `Err` is only
/// for failures of the underlying reader. A trailing `\r` is dropped.
pub struct InputLines<R> {
    reader: R,
}

/// Iterate over the lines of `reader`
pub fn input_lines<R: BufRead>(reader: R) -> InputLines<R> {
    InputLines { reader }
}

impl<R: BufRead> Iterator for InputLines<R> {
    type Item = io::Result<Result<String, Utf8Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                Some(Ok(String::from_utf8(buf).map_err(|e| e.utf8_error())))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// `["error", type, reason]`
pub fn error_reply(error_type: &str, reason: &str) -> Value {
    json!(["error", error_type, reason])
}

/// `["log", message]`
pub fn log_reply(message: &str) -> Value {
    json!(["log", message])
}
