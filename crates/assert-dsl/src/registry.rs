// crates/assert-dsl/src/registry.rs
// ============================================================================
// Module: Registration Contract
// Description: Scope/case registration trait and case body representation.
// Purpose: Define the seam between checkers and whatever runner hosts them.
// Dependencies: crate::error, serde
// ============================================================================

//! ## Overview
//! Checkers never talk to a runner directly. They receive a [`Registrar`] and
//! call [`Registrar::describe`] to open a named scope or [`Registrar::it`] to
//! declare one leaf case. Both calls happen at suite-load time; the
//! [`CaseBody`] handed to `it` is only executed later by the runner.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;
use serde::Serialize;

use crate::error::CaseResult;
use crate::error::RegistrationResult;

// ============================================================================
// SECTION: Case Bodies
// ============================================================================

/// Boxed future returned by eventual case bodies.
pub type CaseFuture = Pin<Box<dyn Future<Output = CaseResult> + Send>>;

/// Deferred work executed when the runner reaches a case.
pub enum CaseBody {
    /// Body that completes synchronously.
    Immediate(Box<dyn FnOnce() -> CaseResult + Send>),
    /// Body that awaits a deferred subject before asserting.
    Eventual(Box<dyn FnOnce() -> CaseFuture + Send>),
}

impl CaseBody {
    /// Wraps a synchronous body.
    pub fn immediate<F>(body: F) -> Self
    where
        F: FnOnce() -> CaseResult + Send + 'static,
    {
        Self::Immediate(Box::new(body))
    }

    /// Wraps an asynchronous body.
    pub fn eventual<F, Fut>(body: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = CaseResult> + Send + 'static,
    {
        Self::Eventual(Box::new(move || Box::pin(body())))
    }

    /// Returns true for asynchronous bodies.
    #[must_use]
    pub const fn is_eventual(&self) -> bool {
        matches!(self, Self::Eventual(_))
    }

    /// Executes the body.
    ///
    /// # Errors
    ///
    /// Returns the [`AssertionFailure`](crate::AssertionFailure) raised by the body.
    pub async fn run(self) -> CaseResult {
        match self {
            Self::Immediate(body) => body(),
            Self::Eventual(body) => body().await,
        }
    }
}

impl fmt::Debug for CaseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate(_) => f.write_str("CaseBody::Immediate"),
            Self::Eventual(_) => f.write_str("CaseBody::Eventual"),
        }
    }
}

// ============================================================================
// SECTION: Invocation Timing
// ============================================================================

/// When table-driven cases invoke the function under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseTiming {
    /// Invoke inside the case body; failures become case failures.
    #[default]
    Deferred,
    /// Invoke while registering; failures abort registration.
    Eager,
}

// ============================================================================
// SECTION: Registrar Trait
// ============================================================================

/// Callback that registers the contents of a scope.
pub type ScopeBody<'b> = dyn FnMut(&mut dyn Registrar) -> RegistrationResult + 'b;

/// Test-runner registration API.
pub trait Registrar {
    /// Opens a named scope and registers its contents through `body`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError`](crate::RegistrationError) when the scope
    /// is rejected or `body` fails.
    fn describe(&mut self, label: &str, body: &mut ScopeBody<'_>) -> RegistrationResult;

    /// Registers one leaf case under the current scope.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError`](crate::RegistrationError) when the case
    /// is rejected.
    fn it(&mut self, label: &str, body: CaseBody) -> RegistrationResult;

    /// Timing used by table-driven helpers.
    fn case_timing(&self) -> CaseTiming {
        CaseTiming::Deferred
    }
}
