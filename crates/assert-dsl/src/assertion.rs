// crates/assert-dsl/src/assertion.rs
// ============================================================================
// Module: Assertions
// Description: Minimal fluent expectations evaluated inside case bodies.
// Purpose: Turn discriminator predicates into assertion failures.
// Dependencies: crate::{error, kind, subject}
// ============================================================================

//! ## Overview
//! A deliberately small expectation chain. Checkers build their case bodies on
//! top of it; suites may also call it directly inside hand-written cases.
//! Every terminal method returns a [`CaseResult`] instead of panicking so the
//! registrar decides how failures are surfaced.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Debug;

use crate::error::AssertionFailure;
use crate::error::CaseResult;
use crate::kind::FalseyKind;
use crate::kind::TypeName;
use crate::subject::Callable;
use crate::subject::Subject;

// ============================================================================
// SECTION: Subject Expectations
// ============================================================================

/// Starts an expectation over a subject.
#[must_use]
pub const fn expect(subject: &Subject) -> Expectation<'_> {
    Expectation {
        subject,
        negated: false,
    }
}

/// Fluent expectation over a borrowed subject.
#[derive(Debug, Clone, Copy)]
pub struct Expectation<'a> {
    /// Subject under assertion.
    subject: &'a Subject,
    /// Whether the next terminal is inverted.
    negated: bool,
}

impl Expectation<'_> {
    /// Inverts the terminal assertion.
    #[must_use]
    pub const fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Asserts the subject's category.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionFailure`] when the (possibly negated) check fails.
    pub fn to_be_a(self, type_name: TypeName) -> CaseResult {
        self.verdict(type_name.matches(self.subject), &format!("be {}", type_name.phrase()))
    }

    /// Asserts falsey-kind membership.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionFailure`] when the (possibly negated) check fails or
    /// when the kind is undefined for the subject's category.
    pub fn to_be(self, kind: FalseyKind) -> CaseResult {
        let holds = kind.classify(self.subject)?;
        self.verdict(holds, &format!("be {}", kind.name()))
    }

    /// Asserts value equality.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionFailure`] when the (possibly negated) check fails.
    pub fn to_equal(self, expected: &Subject) -> CaseResult {
        self.verdict(self.subject == expected, &format!("equal {expected}"))
    }

    /// Asserts that an object subject contains `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionFailure`] when the subject is not an object or the
    /// (possibly negated) check fails.
    pub fn to_have_key(self, key: &str) -> CaseResult {
        let Subject::Object(entries) = self.subject else {
            return Err(AssertionFailure::mismatch(
                format!("expected {} to have key \"{key}\"", self.subject),
                "an object",
                self.subject.category().phrase(),
            ));
        };
        self.verdict(entries.contains_key(key), &format!("have key \"{key}\""))
    }

    /// Applies negation and renders the failure.
    fn verdict(self, holds: bool, predicate: &str) -> CaseResult {
        if holds != self.negated {
            return Ok(());
        }
        let not = if self.negated { "not " } else { "" };
        Err(AssertionFailure::mismatch(
            format!("expected {} to {not}{predicate}", self.subject),
            format!("{not}{predicate}"),
            self.subject.to_string(),
        ))
    }
}

// ============================================================================
// SECTION: Call Expectations
// ============================================================================

/// Starts an expectation over invoking `callable` with `arg`.
#[must_use]
pub const fn expect_call(callable: &Callable, arg: Subject) -> CallExpectation<'_> {
    CallExpectation {
        callable,
        arg,
        negated: false,
    }
}

/// Fluent expectation over a deferred invocation.
#[derive(Debug, Clone)]
pub struct CallExpectation<'a> {
    /// Function to invoke.
    callable: &'a Callable,
    /// Argument passed to the function.
    arg: Subject,
    /// Whether the terminal is inverted.
    negated: bool,
}

impl CallExpectation<'_> {
    /// Inverts the terminal assertion.
    #[must_use]
    pub const fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Asserts the invocation fails with an error of `kind`.
    ///
    /// Negated, it asserts the invocation does not fail with that kind.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionFailure`] when the (possibly negated) check fails.
    pub fn to_throw(self, kind: &str) -> CaseResult {
        let name = self.callable.name().to_string();
        let outcome = self.callable.call(self.arg);
        let thrown_kind = outcome.as_ref().err().map(|error| error.kind.as_str());
        let holds = thrown_kind == Some(kind);
        if holds != self.negated {
            return Ok(());
        }
        let not = if self.negated { "not " } else { "" };
        let actual = match outcome {
            Ok(value) => format!("returned {value}"),
            Err(error) => format!("threw {error}"),
        };
        Err(AssertionFailure::mismatch(
            format!("expected {name} to {not}throw {kind}"),
            format!("{not}throw {kind}"),
            actual,
        ))
    }

    /// Asserts the invocation fails with any error.
    ///
    /// Negated, it asserts the invocation returns normally.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionFailure`] when the (possibly negated) check fails.
    pub fn to_throw_anything(self) -> CaseResult {
        let name = self.callable.name().to_string();
        match (self.callable.call(self.arg), self.negated) {
            (Err(_), false) | (Ok(_), true) => Ok(()),
            (Ok(value), false) => Err(AssertionFailure::mismatch(
                format!("expected {name} to throw"),
                "throw",
                format!("returned {value}"),
            )),
            (Err(error), true) => Err(AssertionFailure::mismatch(
                format!("expected {name} not to throw"),
                "not throw",
                format!("threw {error}"),
            )),
        }
    }
}

// ============================================================================
// SECTION: Typed Equality
// ============================================================================

/// Asserts equality of two typed values.
///
/// # Errors
///
/// Returns [`AssertionFailure`] when the values differ.
#[allow(clippy::use_debug, reason = "Typed values are rendered generically.")]
pub fn expect_equal<T>(actual: &T, expected: &T) -> CaseResult
where
    T: PartialEq + Debug + ?Sized,
{
    if actual == expected {
        return Ok(());
    }
    Err(AssertionFailure::mismatch(
        format!("expected {actual:?} to equal {expected:?}"),
        format!("{expected:?}"),
        format!("{actual:?}"),
    ))
}
