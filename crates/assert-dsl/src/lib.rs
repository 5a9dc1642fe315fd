// crates/assert-dsl/src/lib.rs
// ============================================================================
// Module: Assertion DSL Root
// Description: Public API surface for the assertion registration DSL.
// Purpose: Wire together subjects, checkers, composites, tables, and suites.
// Dependencies: crate::{assertion, audit, checker, composite, config, error, kind, registry,
//              subject, suite, table}
// ============================================================================

//! ## Overview
//! A small vocabulary for registering test assertions against a
//! `describe`/`it` style runner. Callers build checkers (or use the named
//! ones), hand them subjects, and each call registers exactly one case with a
//! [`Registrar`]. Composite helpers and case tables register several cases per
//! call. [`Suite`] is the bundled registrar: it records the case tree, enforces
//! [`SuiteConfig`] limits, and reports registrations to an audit sink.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod assertion;
pub mod audit;
pub mod checker;
pub mod composite;
pub mod config;
pub mod error;
pub mod kind;
pub mod registry;
pub mod subject;
pub mod suite;
pub mod table;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use assertion::CallExpectation;
pub use assertion::Expectation;
pub use assertion::expect;
pub use assertion::expect_call;
pub use assertion::expect_equal;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::RegistrationAuditSink;
pub use audit::RegistrationEvent;
pub use audit::StderrAuditSink;
pub use checker::CheckTarget;
pub use checker::Checker;
pub use checker::Mode;
pub use checker::NoThrowChecker;
pub use checker::Polarity;
pub use checker::SHOULD_BE_A_BOOLEAN;
pub use checker::SHOULD_BE_A_DATE;
pub use checker::SHOULD_BE_A_FUNCTION;
pub use checker::SHOULD_BE_A_NUMBER;
pub use checker::SHOULD_BE_A_STRING;
pub use checker::SHOULD_BE_AN_ARRAY;
pub use checker::SHOULD_BE_AN_ERROR;
pub use checker::SHOULD_BE_AN_OBJECT;
pub use checker::SHOULD_BE_EMPTY;
pub use checker::SHOULD_BE_EMPTY_ASYNC;
pub use checker::SHOULD_BE_NULL;
pub use checker::SHOULD_BE_NULL_ASYNC;
pub use checker::SHOULD_BE_UNDEFINED;
pub use checker::SHOULD_BE_UNDEFINED_ASYNC;
pub use checker::SHOULD_NOT_BE_EMPTY;
pub use checker::SHOULD_NOT_BE_EMPTY_ASYNC;
pub use checker::SHOULD_NOT_BE_NULL;
pub use checker::SHOULD_NOT_BE_NULL_ASYNC;
pub use checker::SHOULD_NOT_BE_UNDEFINED;
pub use checker::SHOULD_NOT_BE_UNDEFINED_ASYNC;
pub use checker::ThrowChecker;
pub use composite::EXISTENCE_SCOPE;
pub use composite::should_have_keys;
pub use composite::test_if_exists;
pub use config::AuditConfig;
pub use config::AuditSinkKind;
pub use config::CONFIG_ENV_VAR;
pub use config::ConfigError;
pub use config::LimitsConfig;
pub use config::SuiteConfig;
pub use error::AssertionFailure;
pub use error::CaseResult;
pub use error::RegistrationError;
pub use error::RegistrationResult;
pub use kind::FalseyKind;
pub use kind::KindParseError;
pub use kind::TypeName;
pub use registry::CaseBody;
pub use registry::CaseFuture;
pub use registry::CaseTiming;
pub use registry::Registrar;
pub use registry::ScopeBody;
pub use subject::Callable;
pub use subject::Deferred;
pub use subject::Settled;
pub use subject::Subject;
pub use subject::SubjectError;
pub use suite::LeafCase;
pub use suite::Node;
pub use suite::Scope;
pub use suite::Suite;
pub use table::TestCase;
pub use table::run_case;
pub use table::test_cases;
pub use table::test_set;
pub use table::try_run_case;
pub use table::try_test_cases;
