// crates/assert-dsl/src/checker.rs
// ============================================================================
// Module: Checker Templates
// Description: Partially-applied checkers built from generic templates.
// Purpose: Register one assertion case per invocation with fixed discriminators.
// Dependencies: crate::{assertion, error, kind, registry, subject}
// ============================================================================

//! ## Overview
//! A [`Checker`] is a template (type, falsey kind, or equality) with its
//! discriminator and [`Mode`] fixed at construction. Invoking
//! [`Checker::check`] with a subject registers exactly one case; nothing is
//! asserted until the runner executes that case. Named checkers such as
//! [`SHOULD_BE_A_NUMBER`] are `const` values built from the same templates.
//!
//! The mode is never inferred from the subject. Handing a deferred subject to
//! an immediate checker (or a ready subject to an eventual one) fails at
//! registration with [`RegistrationError::ModeMismatch`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::assertion::expect;
use crate::assertion::expect_call;
use crate::error::AssertionFailure;
use crate::error::CaseResult;
use crate::error::RegistrationError;
use crate::error::RegistrationResult;
use crate::kind::FalseyKind;
use crate::kind::TypeName;
use crate::registry::CaseBody;
use crate::registry::Registrar;
use crate::subject::Callable;
use crate::subject::Deferred;
use crate::subject::Subject;

// ============================================================================
// SECTION: Modes & Targets
// ============================================================================

/// Whether a checker asserts on a ready value or a settled deferred one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Assert on the subject as supplied.
    #[default]
    Immediate,
    /// Await the deferred subject, then assert on its resolved value.
    Eventually,
}

impl Mode {
    /// Subject shape this mode expects.
    const fn shape(self) -> &'static str {
        match self {
            Self::Immediate => "ready",
            Self::Eventually => "deferred",
        }
    }
}

/// Whether a falsey check is asserted or negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Subject must have the property.
    #[default]
    Affirm,
    /// Subject must not have the property.
    Negate,
}

/// Subject handed to a checker.
#[derive(Debug, Clone)]
pub enum CheckTarget {
    /// Value available now.
    Ready(Subject),
    /// Value available once the deferred settles.
    Deferred(Deferred),
}

impl CheckTarget {
    /// Shape label used in mismatch errors.
    const fn shape(&self) -> &'static str {
        match self {
            Self::Ready(_) => "ready",
            Self::Deferred(_) => "deferred",
        }
    }
}

impl From<Subject> for CheckTarget {
    fn from(value: Subject) -> Self {
        Self::Ready(value)
    }
}

impl From<Deferred> for CheckTarget {
    fn from(value: Deferred) -> Self {
        Self::Deferred(value)
    }
}

/// Implements ready-target conversions for plain values.
macro_rules! ready_target_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for CheckTarget {
                fn from(value: $source) -> Self {
                    Self::Ready(Subject::from(value))
                }
            }
        )*
    };
}

ready_target_from!(bool, f64, i32, u32, &str, String, Value);

/// Awaits a deferred subject, mapping rejection to an assertion failure.
async fn settle(deferred: &Deferred) -> Result<Subject, AssertionFailure> {
    deferred.settle().await.map_err(|error| {
        AssertionFailure::mismatch(
            format!("expected deferred value to resolve but it rejected with {error}"),
            "a resolved value",
            error.to_string(),
        )
    })
}

// ============================================================================
// SECTION: Templates
// ============================================================================

/// Generic checker template with its discriminator fixed.
#[derive(Debug, Clone, PartialEq)]
enum Template {
    /// Category check.
    Type(TypeName),
    /// Falsey-kind check.
    Falsey {
        /// Kind being checked.
        kind: FalseyKind,
        /// Asserted or negated.
        polarity: Polarity,
    },
    /// Value equality check.
    Equals(Subject),
}

impl Template {
    /// Predicate phrase used after "should".
    fn phrase(&self) -> String {
        match self {
            Self::Type(type_name) => format!("be {}", type_name.phrase()),
            Self::Falsey {
                kind,
                polarity: Polarity::Affirm,
            } => format!("be {kind}"),
            Self::Falsey {
                kind,
                polarity: Polarity::Negate,
            } => format!("not be {kind}"),
            Self::Equals(expected) => format!("equal {expected}"),
        }
    }

    /// Evaluates the template against a subject.
    fn evaluate(&self, subject: &Subject) -> CaseResult {
        match self {
            Self::Type(type_name) => expect(subject).to_be_a(*type_name),
            Self::Falsey {
                kind,
                polarity: Polarity::Affirm,
            } => expect(subject).to_be(*kind),
            Self::Falsey {
                kind,
                polarity: Polarity::Negate,
            } => expect(subject).not().to_be(*kind),
            Self::Equals(expected) => expect(subject).to_equal(expected),
        }
    }
}

// ============================================================================
// SECTION: Checker
// ============================================================================

/// Partially-applied checker awaiting only its subject.
///
/// # Invariants
/// - Immutable after construction; [`Checker::check`] is the only operation
///   with a side effect, and it performs exactly one registration.
#[derive(Debug, Clone, PartialEq)]
pub struct Checker {
    /// Template and discriminator.
    template: Template,
    /// Ready or deferred subject handling.
    mode: Mode,
}

impl Checker {
    /// Builds a checker asserting the subject's category.
    #[must_use]
    pub const fn type_of(type_name: TypeName) -> Self {
        Self {
            template: Template::Type(type_name),
            mode: Mode::Immediate,
        }
    }

    /// Builds a checker asserting (or negating) a falsey kind.
    #[must_use]
    pub const fn falsey(kind: FalseyKind, mode: Mode, polarity: Polarity) -> Self {
        Self {
            template: Template::Falsey {
                kind,
                polarity,
            },
            mode,
        }
    }

    /// Builds a checker asserting value equality with `expected`.
    pub fn equals(expected: impl Into<Subject>) -> Self {
        Self {
            template: Template::Equals(expected.into()),
            mode: Mode::Immediate,
        }
    }

    /// Returns the same checker in eventual mode.
    #[must_use]
    pub fn eventually(self) -> Self {
        Self {
            mode: Mode::Eventually,
            ..self
        }
    }

    /// Returns the checker mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the label used for registered cases.
    #[must_use]
    pub fn label(&self) -> String {
        match self.mode {
            Mode::Immediate => format!("should {}", self.template.phrase()),
            Mode::Eventually => format!("should eventually {}", self.template.phrase()),
        }
    }

    /// Evaluates the template directly against a ready subject.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionFailure`] when the check does not hold.
    pub fn evaluate(&self, subject: &Subject) -> CaseResult {
        self.template.evaluate(subject)
    }

    /// Registers one case asserting this checker against `target`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::ModeMismatch`] when the target shape does
    /// not match the checker mode, or any error raised by the registrar.
    pub fn check(
        &self,
        registrar: &mut dyn Registrar,
        target: impl Into<CheckTarget>,
    ) -> RegistrationResult {
        self.check_labelled(registrar, &self.label(), target)
    }

    /// Registers one case under a caller-chosen label.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::ModeMismatch`] when the target shape does
    /// not match the checker mode, or any error raised by the registrar.
    pub fn check_labelled(
        &self,
        registrar: &mut dyn Registrar,
        label: &str,
        target: impl Into<CheckTarget>,
    ) -> RegistrationResult {
        let template = self.template.clone();
        match (self.mode, target.into()) {
            (Mode::Immediate, CheckTarget::Ready(subject)) => {
                registrar.it(label, CaseBody::immediate(move || template.evaluate(&subject)))
            }
            (Mode::Eventually, CheckTarget::Deferred(deferred)) => registrar.it(
                label,
                CaseBody::eventual(move || async move {
                    let subject = settle(&deferred).await?;
                    template.evaluate(&subject)
                }),
            ),
            (mode, target) => Err(RegistrationError::ModeMismatch {
                label: label.to_string(),
                expected: mode.shape(),
                received: target.shape(),
            }),
        }
    }
}

// ============================================================================
// SECTION: Throw Checkers
// ============================================================================

/// Checker asserting that a function fails with a given error kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrowChecker {
    /// Function under test.
    callable: Callable,
}

impl ThrowChecker {
    /// Fixes the function under test.
    #[must_use]
    pub const fn new(callable: Callable) -> Self {
        Self {
            callable,
        }
    }

    /// Registers one case asserting `callable(arg)` fails with `error_kind`.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the registrar.
    pub fn check(
        &self,
        registrar: &mut dyn Registrar,
        arg: impl Into<Subject>,
        error_kind: &str,
    ) -> RegistrationResult {
        let label = format!("{} should throw {error_kind}", self.callable.name());
        let callable = self.callable.clone();
        let arg = arg.into();
        let error_kind = error_kind.to_string();
        registrar.it(
            &label,
            CaseBody::immediate(move || expect_call(&callable, arg).to_throw(&error_kind)),
        )
    }
}

/// Checker asserting that a function returns normally.
#[derive(Debug, Clone, PartialEq)]
pub struct NoThrowChecker {
    /// Function under test.
    callable: Callable,
}

impl NoThrowChecker {
    /// Fixes the function under test.
    #[must_use]
    pub const fn new(callable: Callable) -> Self {
        Self {
            callable,
        }
    }

    /// Registers one case asserting `callable(arg)` does not fail.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the registrar.
    pub fn check(
        &self,
        registrar: &mut dyn Registrar,
        arg: impl Into<Subject>,
    ) -> RegistrationResult {
        let label = format!("{} should not throw", self.callable.name());
        let callable = self.callable.clone();
        let arg = arg.into();
        registrar.it(
            &label,
            CaseBody::immediate(move || expect_call(&callable, arg).not().to_throw_anything()),
        )
    }
}

// ============================================================================
// SECTION: Named Checkers
// ============================================================================

/// Subject must be an object.
pub const SHOULD_BE_AN_OBJECT: Checker = Checker::type_of(TypeName::Object);
/// Subject must be an array.
pub const SHOULD_BE_AN_ARRAY: Checker = Checker::type_of(TypeName::Array);
/// Subject must be a boolean.
pub const SHOULD_BE_A_BOOLEAN: Checker = Checker::type_of(TypeName::Boolean);
/// Subject must be a string.
pub const SHOULD_BE_A_STRING: Checker = Checker::type_of(TypeName::String);
/// Subject must be a number.
pub const SHOULD_BE_A_NUMBER: Checker = Checker::type_of(TypeName::Number);
/// Subject must be an error.
pub const SHOULD_BE_AN_ERROR: Checker = Checker::type_of(TypeName::Error);
/// Subject must be a function.
pub const SHOULD_BE_A_FUNCTION: Checker = Checker::type_of(TypeName::Function);
/// Subject must be a date.
pub const SHOULD_BE_A_DATE: Checker = Checker::type_of(TypeName::Date);

/// Subject must be null.
pub const SHOULD_BE_NULL: Checker =
    Checker::falsey(FalseyKind::Null, Mode::Immediate, Polarity::Affirm);
/// Subject must not be null.
pub const SHOULD_NOT_BE_NULL: Checker =
    Checker::falsey(FalseyKind::Null, Mode::Immediate, Polarity::Negate);
/// Subject must be undefined.
pub const SHOULD_BE_UNDEFINED: Checker =
    Checker::falsey(FalseyKind::Undefined, Mode::Immediate, Polarity::Affirm);
/// Subject must not be undefined.
pub const SHOULD_NOT_BE_UNDEFINED: Checker =
    Checker::falsey(FalseyKind::Undefined, Mode::Immediate, Polarity::Negate);
/// Subject must be empty.
pub const SHOULD_BE_EMPTY: Checker =
    Checker::falsey(FalseyKind::Empty, Mode::Immediate, Polarity::Affirm);
/// Subject must not be empty.
pub const SHOULD_NOT_BE_EMPTY: Checker =
    Checker::falsey(FalseyKind::Empty, Mode::Immediate, Polarity::Negate);

/// Deferred subject must resolve to null.
pub const SHOULD_BE_NULL_ASYNC: Checker =
    Checker::falsey(FalseyKind::Null, Mode::Eventually, Polarity::Affirm);
/// Deferred subject must not resolve to null.
pub const SHOULD_NOT_BE_NULL_ASYNC: Checker =
    Checker::falsey(FalseyKind::Null, Mode::Eventually, Polarity::Negate);
/// Deferred subject must resolve to undefined.
pub const SHOULD_BE_UNDEFINED_ASYNC: Checker =
    Checker::falsey(FalseyKind::Undefined, Mode::Eventually, Polarity::Affirm);
/// Deferred subject must not resolve to undefined.
pub const SHOULD_NOT_BE_UNDEFINED_ASYNC: Checker =
    Checker::falsey(FalseyKind::Undefined, Mode::Eventually, Polarity::Negate);
/// Deferred subject must resolve to an empty container.
pub const SHOULD_BE_EMPTY_ASYNC: Checker =
    Checker::falsey(FalseyKind::Empty, Mode::Eventually, Polarity::Affirm);
/// Deferred subject must resolve to a non-empty container.
pub const SHOULD_NOT_BE_EMPTY_ASYNC: Checker =
    Checker::falsey(FalseyKind::Empty, Mode::Eventually, Polarity::Negate);
