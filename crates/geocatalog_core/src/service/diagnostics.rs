//! Diagnostic sinks for per-extension failures.
//!
//! # Responsibility
//! - Carry `(severity, message, cause)` reports out of the resolver.
//! - Bridge reports onto the `log` facade for hosts without their own sink.
//!
//! # Invariants
//! - Reporting never fails and never panics the caller.
//! - Log bridge output is single-line; newlines in messages are stripped.

use crate::logging::sanitize_message;
use std::error::Error;
use std::sync::Mutex;

/// `log` target for developer-facing failure details.
pub const DEVELOPER_LOG_TARGET: &str = "geocatalog::developer";

const MAX_DIAGNOSTIC_MESSAGE_CHARS: usize = 400;

/// Report severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Trace,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Matching `log` level for the log bridge.
    pub fn level(self) -> log::Level {
        match self {
            Self::Trace => log::Level::Trace,
            Self::Info => log::Level::Info,
            Self::Warning => log::Level::Warn,
            Self::Error => log::Level::Error,
        }
    }
}

/// Host-supplied destination for catalog diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, severity: Severity, message: &str, cause: Option<&dyn Error>);
}

/// Forwards reports to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnosticSink;

impl DiagnosticSink for LogDiagnosticSink {
    fn report(&self, severity: Severity, message: &str, cause: Option<&dyn Error>) {
        let cause = cause
            .map(|err| sanitize_message(&err.to_string(), MAX_DIAGNOSTIC_MESSAGE_CHARS))
            .unwrap_or_else(|| "none".to_string());
        log::log!(
            severity.level(),
            "event=catalog_diagnostic module=catalog severity={} message={} cause={}",
            severity.as_str(),
            sanitize_message(message, MAX_DIAGNOSTIC_MESSAGE_CHARS),
            cause
        );
    }
}

/// One captured report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRecord {
    pub severity: Severity,
    pub message: String,
    /// Rendered cause, when one was attached.
    pub cause: Option<String>,
}

/// Keeps reports in memory, e.g. for a host's problems view.
#[derive(Debug, Default)]
pub struct BufferedDiagnosticSink {
    records: Mutex<Vec<DiagnosticRecord>>,
}

impl BufferedDiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of buffered records.
    pub fn records(&self) -> Vec<DiagnosticRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Removes and returns all buffered records.
    pub fn drain(&self) -> Vec<DiagnosticRecord> {
        std::mem::take(
            &mut *self
                .records
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }

    pub fn count_at(&self, severity: Severity) -> usize {
        self.records()
            .iter()
            .filter(|record| record.severity == severity)
            .count()
    }
}

impl DiagnosticSink for BufferedDiagnosticSink {
    fn report(&self, severity: Severity, message: &str, cause: Option<&dyn Error>) {
        let record = DiagnosticRecord {
            severity,
            message: message.to_string(),
            cause: cause.map(|err| err.to_string()),
        };
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record);
    }
}
