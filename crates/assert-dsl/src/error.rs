// crates/assert-dsl/src/error.rs
// ============================================================================
// Module: Assertion DSL Errors
// Description: Failure channels for case bodies and registration calls.
// Purpose: Keep assertion outcomes separate from suite-loading failures.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Two failure channels exist. [`AssertionFailure`] is returned from a
//! registered case body and marks that single case as failing.
//! [`RegistrationError`] is returned synchronously from a helper call and
//! aborts loading of the suite that issued it.

use thiserror::Error;

// ============================================================================
// SECTION: Assertion Failures
// ============================================================================

/// Failure raised by a case body when its assertion does not hold.
///
/// # Invariants
/// - `message` is always populated; `expected`/`actual` are optional detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssertionFailure {
    /// Human-readable failure summary.
    pub message: String,
    /// Rendered expectation, when one applies.
    pub expected: Option<String>,
    /// Rendered observed value, when one applies.
    pub actual: Option<String>,
}

impl AssertionFailure {
    /// Creates a failure with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// Creates a failure carrying expected and actual renderings.
    pub fn mismatch(
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            expected: Some(expected.into()),
            actual: Some(actual.into()),
        }
    }
}

/// Outcome of running one registered case body.
pub type CaseResult = Result<(), AssertionFailure>;

// ============================================================================
// SECTION: Registration Errors
// ============================================================================

/// Errors raised while registering scopes or cases.
///
/// # Invariants
/// - None. Variants capture structured registration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Checker mode does not match the shape of the supplied subject.
    #[error("checker `{label}` expects a {expected} subject but received a {received} one")]
    ModeMismatch {
        /// Label of the case that was being registered.
        label: String,
        /// Subject shape the checker was built for.
        expected: &'static str,
        /// Subject shape actually supplied.
        received: &'static str,
    },

    /// The function under test failed while being invoked at registration time.
    #[error("function under test failed while registering `{description}`: {message}")]
    Invocation {
        /// Description of the table case being registered.
        description: String,
        /// Rendered failure from the function under test.
        message: String,
    },

    /// A scope or case label was empty.
    #[error("{target} label must be non-empty")]
    EmptyLabel {
        /// Whether the label belonged to a scope or a case.
        target: &'static str,
    },

    /// A scope or case label exceeded the configured byte limit.
    #[error("{target} label exceeds {max_bytes} bytes ({actual_bytes})")]
    LabelTooLong {
        /// Whether the label belonged to a scope or a case.
        target: &'static str,
        /// Configured maximum label size.
        max_bytes: usize,
        /// Observed label size.
        actual_bytes: usize,
    },

    /// Scope nesting exceeded the configured depth.
    #[error("scope nesting too deep: {actual_depth} levels (max {max_depth})")]
    ScopeTooDeep {
        /// Configured maximum nesting depth.
        max_depth: usize,
        /// Depth that would have been reached.
        actual_depth: usize,
    },
}

/// Convenient result type for registration calls.
pub type RegistrationResult<T = ()> = Result<T, RegistrationError>;
