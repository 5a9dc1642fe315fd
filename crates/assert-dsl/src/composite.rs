// crates/assert-dsl/src/composite.rs
// ============================================================================
// Module: Composite Helpers
// Description: Multi-case helpers built from checkers and expectations.
// Purpose: Express common multi-property checks in one call.
// Dependencies: crate::{assertion, checker, error, kind, registry, subject}
// ============================================================================

//! ## Overview
//! Composite helpers register several independent cases per call. A failing
//! case never suppresses its siblings: each is registered up front and runs
//! on its own.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::assertion::expect;
use crate::checker::CheckTarget;
use crate::checker::Checker;
use crate::checker::Mode;
use crate::checker::Polarity;
use crate::error::RegistrationResult;
use crate::kind::FalseyKind;
use crate::registry::CaseBody;
use crate::registry::Registrar;
use crate::subject::Subject;

// ============================================================================
// SECTION: Existence
// ============================================================================

/// Scope label opened by [`test_if_exists`].
pub const EXISTENCE_SCOPE: &str = "should not return a falsey value";

/// Absence checks registered by [`test_if_exists`], in registration order.
const EXISTENCE_CASES: [(FalseyKind, &str); 3] = [
    (FalseyKind::Null, "not null"),
    (FalseyKind::Undefined, "not undefined"),
    (FalseyKind::Empty, "not an empty object / array"),
];

/// Registers not-null, not-undefined, and not-empty cases for one subject.
///
/// The cases are grouped under [`EXISTENCE_SCOPE`] and always registered in
/// that order, each using `mode`.
///
/// # Errors
///
/// Returns [`RegistrationError::ModeMismatch`](crate::RegistrationError::ModeMismatch)
/// when `target` does not match `mode`, or any error raised by the registrar.
pub fn test_if_exists(
    registrar: &mut dyn Registrar,
    target: impl Into<CheckTarget>,
    mode: Mode,
) -> RegistrationResult {
    let target = target.into();
    registrar.describe(EXISTENCE_SCOPE, &mut |scope| {
        for (kind, label) in EXISTENCE_CASES {
            Checker::falsey(kind, mode, Polarity::Negate).check_labelled(
                scope,
                label,
                target.clone(),
            )?;
        }
        Ok(())
    })
}

// ============================================================================
// SECTION: Keys
// ============================================================================

/// Registers one key-presence case per key, in the order supplied.
///
/// Duplicate keys register duplicate cases.
///
/// # Errors
///
/// Returns any error raised by the registrar.
pub fn should_have_keys<K>(
    registrar: &mut dyn Registrar,
    subject: impl Into<Subject>,
    keys: &[K],
) -> RegistrationResult
where
    K: AsRef<str>,
{
    let subject = subject.into();
    for key in keys {
        let key = key.as_ref().to_string();
        let label = format!("should have key \"{key}\"");
        let subject = subject.clone();
        registrar.it(&label, CaseBody::immediate(move || expect(&subject).to_have_key(&key)))?;
    }
    Ok(())
}
