//! Query server session
//!
//! Holds the functions registered since the last `reset` and answers
//! requests one line at a time. Every registered slot runs the built-in
//! recent-posts view; the submitted source is only fingerprinted for logs.

use std::io::{self, BufRead, Write};

use serde_json::Value;
use sha2::{Digest, Sha256};

use super::protocol::{error_reply, input_lines, log_reply, OnMapError, ProtocolError, Request};
use crate::observability::{log_event, log_event_with_fields, Event, MapMetrics, MetricsSnapshot};
use crate::view::{FallbackPolicy, RecentPostsView, ViewError, ViewFunction};

struct RegisteredFunction {
    view: Box<dyn ViewFunction>,
    source_digest: String,
}

/// A view server bound to one host connection
pub struct ViewServer {
    functions: Vec<RegisteredFunction>,
    policy: FallbackPolicy,
    on_error: OnMapError,
    metrics: MapMetrics,
}

impl ViewServer {
    pub fn new(policy: FallbackPolicy, on_error: OnMapError) -> Self {
        Self {
            functions: Vec::new(),
            policy,
            on_error,
            metrics: MapMetrics::new(),
        }
    }

    /// Number of functions registered since the last reset
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// SHA-256 digests of the registered sources, in slot order
    pub fn source_digests(&self) -> Vec<&str> {
        self.functions
            .iter()
            .map(|f| f.source_digest.as_str())
            .collect()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Serve requests until end of input.
    ///
    /// Replies are flushed after every request. A line that is not UTF-8 is
    /// rejected like any other malformed request.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        log_event(Event::ServerStart);

        for line in input_lines(input) {
            let replies = match line? {
                Ok(text) => self.handle_line(&text),
                Err(e) => reject(ProtocolError::InvalidUtf8(e.to_string())),
            };
            for reply in replies {
                serde_json::to_writer(&mut output, &reply)?;
                writeln!(output)?;
            }
            output.flush()?;
        }

        let snapshot = self.metrics.snapshot();
        let fields = snapshot.fields();
        let refs: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        log_event_with_fields(Event::ServerStop, &refs);
        Ok(())
    }

    /// Answer one raw request line. Blank lines produce no reply.
    pub fn handle_line(&mut self, line: &str) -> Vec<Value> {
        if line.trim().is_empty() {
            return Vec::new();
        }
        match Request::parse(line) {
            Ok(request) => self.handle(request),
            Err(e) => reject(e),
        }
    }

    /// Answer one parsed request
    pub fn handle(&mut self, request: Request) -> Vec<Value> {
        match request {
            Request::Reset => {
                self.functions.clear();
                log_event(Event::ViewReset);
                vec![Value::Bool(true)]
            }
            Request::AddFun(source) => {
                self.add_fun(&source);
                vec![Value::Bool(true)]
            }
            Request::MapDoc(doc) => self.map_doc(&doc),
        }
    }

    fn add_fun(&mut self, source: &str) {
        let mut hasher = Sha256::new();
        hasher.update(source.as_bytes());
        let source_digest = format!("{:x}", hasher.finalize());

        let view = RecentPostsView::new(self.policy);
        let slot = self.functions.len().to_string();
        log_event_with_fields(
            Event::FunctionRegistered,
            &[
                ("name", view.name()),
                ("policy", self.policy.as_str()),
                ("slot", slot.as_str()),
                ("source_sha256", source_digest.as_str()),
            ],
        );

        self.functions.push(RegisteredFunction {
            view: Box::new(view),
            source_digest,
        });
    }

    fn map_doc(&mut self, doc: &Value) -> Vec<Value> {
        let doc_id = doc.get("_id").and_then(Value::as_str).unwrap_or("");
        let mut logs = Vec::new();
        let mut results = Vec::with_capacity(self.functions.len());
        let mut failed = false;
        let mut rows_total = 0u64;

        for function in &self.functions {
            match function.view.map(doc) {
                Ok(rows) => {
                    rows_total += rows.len() as u64;
                    match serde_json::to_value(&rows) {
                        Ok(rows) => results.push(rows),
                        Err(e) => {
                            self.metrics.record_failed();
                            return vec![error_reply("map_failed", &e.to_string())];
                        }
                    }
                }
                Err(e) => {
                    failed = true;
                    log_failure(function.view.name(), doc_id, &e);
                    if self.on_error == OnMapError::Abort {
                        self.metrics.record_failed();
                        return vec![error_reply("map_failed", &e.to_string())];
                    }
                    logs.push(log_reply(&format!(
                        "function raised exception ({}) with doc._id {}",
                        e, doc_id
                    )));
                    results.push(Value::Array(Vec::new()));
                }
            }
        }

        if failed {
            self.metrics.record_failed();
        } else {
            self.metrics.record_mapped(rows_total);
            let event = if rows_total == 0 {
                Event::DocumentSkipped
            } else {
                Event::DocumentMapped
            };
            log_event_with_fields(event, &[("doc_id", doc_id)]);
        }

        logs.push(Value::Array(results));
        logs
    }
}

fn reject(err: ProtocolError) -> Vec<Value> {
    let reason = err.to_string();
    log_event_with_fields(
        Event::RequestRejected,
        &[("error_type", err.error_type()), ("reason", reason.as_str())],
    );
    vec![err.to_reply()]
}

fn log_failure(view: &str, doc_id: &str, err: &ViewError) {
    let reason = err.message();
    log_event_with_fields(
        Event::DocumentFailed,
        &[
            ("code", err.code().code()),
            ("doc_id", doc_id),
            ("reason", reason.as_str()),
            ("view", view),
        ],
    );
}
