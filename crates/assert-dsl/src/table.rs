// crates/assert-dsl/src/table.rs
// ============================================================================
// Module: Table-Driven Cases
// Description: Register one scope and case per (description, input, expected).
// Purpose: Turn literal case tables into registered equality assertions.
// Dependencies: crate::{assertion, error, registry}
// ============================================================================

//! ## Overview
//! Each [`TestCase`] becomes a scope labelled with its description holding a
//! single `should return <expected>` case, with `<expected>` rendered through
//! `Debug` (`should return "A"`). The function under test is invoked
//! exactly once per case; whether that happens while the case runs
//! ([`CaseTiming::Deferred`]) or while it is registered
//! ([`CaseTiming::Eager`]) is decided by the registrar.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::convert::Infallible;
use std::fmt::Debug;
use std::fmt::Display;
use std::sync::Arc;

use crate::assertion::expect_equal;
use crate::error::AssertionFailure;
use crate::error::RegistrationError;
use crate::error::RegistrationResult;
use crate::registry::CaseBody;
use crate::registry::CaseTiming;
use crate::registry::Registrar;

// ============================================================================
// SECTION: Test Case Tuple
// ============================================================================

/// One row of a case table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase<I, O> {
    /// Scope label for the row.
    pub description: String,
    /// Argument passed to the function under test.
    pub input: I,
    /// Value the function must return.
    pub expected: O,
}

impl<I, O> TestCase<I, O> {
    /// Creates a table row.
    pub fn new(description: impl Into<String>, input: I, expected: O) -> Self {
        Self {
            description: description.into(),
            input,
            expected,
        }
    }
}

impl<D, I, O> From<(D, I, O)> for TestCase<I, O>
where
    D: Into<String>,
{
    fn from((description, input, expected): (D, I, O)) -> Self {
        Self::new(description, input, expected)
    }
}

// ============================================================================
// SECTION: Single Case
// ============================================================================

/// Registers one table row against `func`.
///
/// # Errors
///
/// Returns any error raised by the registrar.
pub fn run_case<F, I, O>(
    registrar: &mut dyn Registrar,
    func: F,
    case: impl Into<TestCase<I, O>>,
) -> RegistrationResult
where
    F: Fn(I) -> O + Send + Sync + 'static,
    I: Send + 'static,
    O: PartialEq + Debug + Send + 'static,
{
    try_run_case(registrar, move |input| Ok::<O, Infallible>(func(input)), case)
}

/// Registers one table row against a fallible `func`.
///
/// # Errors
///
/// Returns [`RegistrationError::Invocation`] when timing is eager and `func`
/// fails, or any error raised by the registrar.
pub fn try_run_case<F, I, O, E>(
    registrar: &mut dyn Registrar,
    func: F,
    case: impl Into<TestCase<I, O>>,
) -> RegistrationResult
where
    F: Fn(I) -> Result<O, E> + Send + Sync + 'static,
    I: Send + 'static,
    O: PartialEq + Debug + Send + 'static,
    E: Display + 'static,
{
    register_case(registrar, &Arc::new(func), case.into())
}

/// Single-row form with the row first and the function second.
///
/// # Errors
///
/// Returns any error raised by the registrar.
pub fn test_set<F, I, O>(
    registrar: &mut dyn Registrar,
    case: impl Into<TestCase<I, O>>,
    func: F,
) -> RegistrationResult
where
    F: Fn(I) -> O + Send + Sync + 'static,
    I: Send + 'static,
    O: PartialEq + Debug + Send + 'static,
{
    run_case(registrar, func, case)
}

// ============================================================================
// SECTION: Batches
// ============================================================================

/// Registers every row, in order, against the same `func`.
///
/// # Errors
///
/// Returns the first error raised while registering a row.
pub fn test_cases<F, I, O, C>(
    registrar: &mut dyn Registrar,
    func: F,
    cases: C,
) -> RegistrationResult
where
    F: Fn(I) -> O + Send + Sync + 'static,
    I: Send + 'static,
    O: PartialEq + Debug + Send + 'static,
    C: IntoIterator,
    C::Item: Into<TestCase<I, O>>,
{
    try_test_cases(registrar, move |input| Ok::<O, Infallible>(func(input)), cases)
}

/// Registers every row, in order, against the same fallible `func`.
///
/// # Errors
///
/// Returns the first error raised while registering a row.
pub fn try_test_cases<F, I, O, E, C>(
    registrar: &mut dyn Registrar,
    func: F,
    cases: C,
) -> RegistrationResult
where
    F: Fn(I) -> Result<O, E> + Send + Sync + 'static,
    I: Send + 'static,
    O: PartialEq + Debug + Send + 'static,
    E: Display + 'static,
    C: IntoIterator,
    C::Item: Into<TestCase<I, O>>,
{
    let func = Arc::new(func);
    for case in cases {
        register_case(registrar, &func, case.into())?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Opens the row scope and registers its single equality case.
#[allow(clippy::use_debug, reason = "Expected values are rendered generically in labels.")]
fn register_case<F, I, O, E>(
    registrar: &mut dyn Registrar,
    func: &Arc<F>,
    case: TestCase<I, O>,
) -> RegistrationResult
where
    F: Fn(I) -> Result<O, E> + Send + Sync + 'static,
    I: Send + 'static,
    O: PartialEq + Debug + Send + 'static,
    E: Display + 'static,
{
    let TestCase {
        description,
        input,
        expected,
    } = case;
    let label = format!("should return {expected:?}");
    let timing = registrar.case_timing();
    let mut row = Some((input, expected));
    registrar.describe(&description, &mut |scope| {
        let Some((input, expected)) = row.take() else {
            return Ok(());
        };
        match timing {
            CaseTiming::Eager => {
                let actual = func(input).map_err(|err| RegistrationError::Invocation {
                    description: description.clone(),
                    message: err.to_string(),
                })?;
                scope.it(&label, CaseBody::immediate(move || expect_equal(&actual, &expected)))
            }
            CaseTiming::Deferred => {
                let func = Arc::clone(func);
                scope.it(
                    &label,
                    CaseBody::immediate(move || {
                        let actual = func(input).map_err(|err| {
                            AssertionFailure::new(format!("function under test failed: {err}"))
                        })?;
                        expect_equal(&actual, &expected)
                    }),
                )
            }
        }
    })
}
