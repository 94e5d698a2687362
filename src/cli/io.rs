//! JSON I/O for CLI commands
//!
//! - `map`: one JSON document in, one JSON envelope out
//! - `batch`: JSON lines in, JSON lines out
//! - UTF-8 only

use std::io::{BufRead, Write};

use serde::Serialize;
use serde_json::{json, Value};

use super::errors::{CliError, CliResult};

/// Read a whole input as one JSON document
pub fn read_document<R: BufRead>(mut reader: R) -> CliResult<Value> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    if content.trim().is_empty() {
        return Err(CliError::bad_input("Empty input"));
    }

    Ok(serde_json::from_str(&content)?)
}

/// Write `{"status":"ok","data":...}`
pub fn write_response<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    let response = json!({
        "status": "ok",
        "data": data
    });
    write_line(writer, &response)
}

/// Write `{"status":"error","code":...,"message":...}`
pub fn write_error<W: Write>(writer: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_line(writer, &response)
}

/// Write one value as a single JSON line and flush
pub fn write_line<W: Write, T: Serialize>(writer: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_document_multiline() {
        let input = b"{\n  \"type\": \"Note\"\n}\n";
        let doc = read_document(&input[..]).unwrap();
        assert_eq!(doc["type"], "Note");
    }

    #[test]
    fn test_read_document_empty() {
        let err = read_document(&b"  \n"[..]).unwrap_err();
        assert_eq!(err.code_str(), "FEEDVIEW_CLI_BAD_INPUT");
    }

    #[test]
    fn test_envelopes() {
        let mut out = Vec::new();
        write_response(&mut out, Value::Null).unwrap();
        write_error(&mut out, "X", "y").unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines[0], json!({ "status": "ok", "data": null }));
        assert_eq!(
            lines[1],
            json!({ "status": "error", "code": "X", "message": "y" })
        );
    }
}
