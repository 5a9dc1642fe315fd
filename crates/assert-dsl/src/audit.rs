// crates/assert-dsl/src/audit.rs
// ============================================================================
// Module: Registration Audit Logging
// Description: Structured events for scope and case registration.
// Purpose: Emit JSON-line logs of suite loading without hard dependencies.
// Dependencies: crate::{config, error}, serde, serde_json
// ============================================================================

//! ## Overview
//! Every scope opened, case registered, registration rejected, or scope
//! discarded by a [`Suite`](crate::Suite) is reported to a
//! [`RegistrationAuditSink`]. Sinks
//! are lightweight so callers can route events to their preferred logging
//! pipeline; the bundled sinks write JSON lines to stderr or a file.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::config::AuditConfig;
use crate::config::AuditSinkKind;
use crate::error::RegistrationError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Registration audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Labels of the enclosing scopes, outermost first.
    pub path: Vec<String>,
    /// Label of the scope or case.
    pub label: String,
    /// Whether the registered case awaits a deferred subject.
    pub eventual: Option<bool>,
    /// Reason for `registration_rejected` and `scope_discarded` events.
    pub error: Option<String>,
}

impl RegistrationEvent {
    /// Builds an event with a consistent timestamp.
    fn new(event: &'static str, path: Vec<String>, label: &str) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event,
            timestamp_ms,
            path,
            label: label.to_string(),
            eventual: None,
            error: None,
        }
    }

    /// Event for a newly opened scope.
    #[must_use]
    pub fn scope_opened(path: Vec<String>, label: &str) -> Self {
        Self::new("scope_opened", path, label)
    }

    /// Event for a newly registered case.
    #[must_use]
    pub fn case_registered(path: Vec<String>, label: &str, eventual: bool) -> Self {
        Self {
            eventual: Some(eventual),
            ..Self::new("case_registered", path, label)
        }
    }

    /// Event for a rejected scope or case.
    #[must_use]
    pub fn rejected(path: Vec<String>, label: &str, error: &RegistrationError) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::new("registration_rejected", path, label)
        }
    }

    /// Event for an opened scope dropped because its body failed.
    ///
    /// Every scope and case registered inside it is dropped with it.
    #[must_use]
    pub fn scope_discarded(path: Vec<String>, label: &str, error: &RegistrationError) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::new("scope_discarded", path, label)
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for registration events.
pub trait RegistrationAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &RegistrationEvent);
}

/// Audit sink that drops all events.
pub struct NoopAuditSink;

impl RegistrationAuditSink for NoopAuditSink {
    fn record(&self, _event: &RegistrationEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl RegistrationAuditSink for StderrAuditSink {
    fn record(&self, event: &RegistrationEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl RegistrationAuditSink for FileAuditSink {
    fn record(&self, event: &RegistrationEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

// ============================================================================
// SECTION: Construction
// ============================================================================

/// Builds the sink selected by configuration.
///
/// # Errors
///
/// Returns an error when a file sink cannot open its log file.
pub fn sink_from_config(config: &AuditConfig) -> io::Result<Arc<dyn RegistrationAuditSink>> {
    match (config.sink, config.path.as_deref()) {
        (AuditSinkKind::None, _) => Ok(Arc::new(NoopAuditSink)),
        (AuditSinkKind::Stderr, _) => Ok(Arc::new(StderrAuditSink)),
        (AuditSinkKind::File, Some(path)) => Ok(Arc::new(FileAuditSink::new(path)?)),
        (AuditSinkKind::File, None) => {
            Err(io::Error::new(io::ErrorKind::InvalidInput, "audit.path is required for file sink"))
        }
    }
}
