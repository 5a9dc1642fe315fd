// crates/assert-dsl/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared result helpers and case runners for integration tests.
// ============================================================================
//! ## Overview
//! Shared test helpers for consistent Result-based assertions, plus a small
//! sequential runner and a recording audit sink.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    dead_code,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::error::Error;
use std::fmt;
use std::sync::Mutex;

use assert_dsl::CaseResult;
use assert_dsl::RegistrationAuditSink;
use assert_dsl::RegistrationEvent;
use assert_dsl::Suite;

// ========================================================================
// Test Result Helpers
// ========================================================================

/// Standard result type used across assertion DSL integration tests.
pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;

/// Lightweight error type for test assertions.
#[derive(Debug)]
struct TestError {
    /// Human-readable failure message.
    message: String,
}

impl TestError {
    /// Creates a new test error with the provided message.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TestError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for TestError {}

/// Returns an error when a test condition fails.
///
/// # Errors
/// Returns a `TestError` when the condition is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition { Ok(()) } else { Err(Box::new(TestError::new(message))) }
}

// ========================================================================
// Case Runner
// ========================================================================

/// Outcome of one executed case.
#[derive(Debug)]
pub struct Outcome {
    /// Scope labels and case label joined with ` > `.
    pub name: String,
    /// Case result.
    pub result: CaseResult,
}

impl Outcome {
    /// Returns true when the case passed.
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs every registered case in order.
pub async fn run_all(suite: Suite) -> Vec<Outcome> {
    let mut outcomes = Vec::new();
    for case in suite.into_cases() {
        let name = case.full_name();
        let result = case.run().await;
        outcomes.push(Outcome {
            name,
            result,
        });
    }
    outcomes
}

/// Returns the names of passing cases followed by failing ones.
pub fn partition(outcomes: &[Outcome]) -> (Vec<&str>, Vec<&str>) {
    let passed = outcomes.iter().filter(|o| o.passed()).map(|o| o.name.as_str()).collect();
    let failed = outcomes.iter().filter(|o| !o.passed()).map(|o| o.name.as_str()).collect();
    (passed, failed)
}

// ========================================================================
// Recording Audit Sink
// ========================================================================

/// Audit sink that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Events in arrival order.
    events: Mutex<Vec<RegistrationEvent>>,
}

impl RecordingSink {
    /// Returns a copy of the recorded events.
    pub fn events(&self) -> Vec<RegistrationEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl RegistrationAuditSink for RecordingSink {
    fn record(&self, event: &RegistrationEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
