// crates/assert-dsl/tests/subject.rs
// ============================================================================
// Module: Subject Tests
// Description: Coverage for subject categories, conversions, and deferreds.
// Purpose: Ensure subjects classify consistently and deferred values settle
//          exactly once for every clone.
// Dependencies: assert_dsl, serde_json, tokio
// ============================================================================
//! ## Overview
//! Integration tests for [`Subject`], [`Callable`], and [`Deferred`].

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Test Support
// ============================================================================

mod support;

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use assert_dsl::Callable;
use assert_dsl::Deferred;
use assert_dsl::FalseyKind;
use assert_dsl::Subject;
use assert_dsl::SubjectError;
use assert_dsl::TypeName;
use serde_json::json;
use support::TestResult;
use support::ensure;

// ============================================================================
// SECTION: Categories & Conversions
// ============================================================================

#[test]
fn json_values_map_to_categories() -> TestResult {
    let subject = Subject::from(json!({
        "count": 3,
        "tags": ["a"],
        "enabled": false,
        "owner": null,
        "name": "gate"
    }));
    let Subject::Object(entries) = &subject else {
        return Err("Expected an object subject".into());
    };
    let categories: Vec<(&str, TypeName)> =
        entries.iter().map(|(key, value)| (key.as_str(), value.category())).collect();
    ensure(
        categories
            == vec![
                ("count", TypeName::Number),
                ("enabled", TypeName::Boolean),
                ("name", TypeName::String),
                ("owner", TypeName::Null),
                ("tags", TypeName::Array),
            ],
        "Expected JSON values to keep their categories",
    )?;
    Ok(())
}

#[test]
fn missing_values_become_undefined() -> TestResult {
    ensure(Subject::from(None::<i32>) == Subject::Undefined, "Expected None to be undefined")?;
    ensure(Subject::from(Some("x")) == Subject::from("x"), "Expected Some to unwrap")?;
    ensure(
        Subject::from(vec![Some(1), None])
            == Subject::array([Subject::from(1), Subject::Undefined]),
        "Expected nested options to convert",
    )?;
    Ok(())
}

#[test]
fn display_renders_js_like_values() -> TestResult {
    let subject = Subject::object([("list", Subject::array([1, 2])), ("name", Subject::from("a"))]);
    ensure(subject.to_string() == "{list: [1, 2], name: \"a\"}", "Expected object rendering")?;
    let callable = Callable::new("noop", Ok);
    ensure(
        Subject::from(callable).to_string() == "[Function noop]",
        "Expected function rendering",
    )?;
    ensure(Subject::Undefined.to_string() == "undefined", "Expected undefined rendering")?;
    Ok(())
}

#[test]
fn names_parse_case_insensitively() -> TestResult {
    ensure("Number".parse::<TypeName>()? == TypeName::Number, "Expected type name lookup")?;
    ensure(" EMPTY ".parse::<FalseyKind>()? == FalseyKind::Empty, "Expected falsey lookup")?;
    let unknown = "integer".parse::<TypeName>();
    ensure(unknown.is_err(), "Expected unknown type name to fail")?;
    Ok(())
}

#[test]
fn callables_compare_by_identity() -> TestResult {
    let first = Callable::new("double", |arg| match arg {
        Subject::Number(value) => Ok(Subject::Number(value * 2.0)),
        other => Err(SubjectError::new("TypeError", format!("{other} is not a number"))),
    });
    let second = Callable::new("double", Ok);
    ensure(first == first.clone(), "Expected clones to compare equal")?;
    ensure(first != second, "Expected distinct functions to differ")?;
    ensure(first.call(Subject::from(4))? == Subject::from(8), "Expected call to apply function")?;
    Ok(())
}

// ============================================================================
// SECTION: Deferred Values
// ============================================================================

#[tokio::test]
async fn deferred_settles_once_for_all_clones() -> TestResult {
    let polls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&polls);
    let deferred = Deferred::new(async move {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Subject::from("done"))
    });
    let clone = deferred.clone();
    ensure(!deferred.is_settled(), "Expected deferred to start pending")?;
    let first = deferred.settle().await?;
    let second = clone.settle().await?;
    ensure(first == second, "Expected clones to observe the same value")?;
    ensure(polls.load(Ordering::SeqCst) == 1, "Expected source future to run once")?;
    ensure(clone.is_settled(), "Expected clones to share settlement")?;
    Ok(())
}

#[tokio::test]
async fn rejected_deferred_reports_error() -> TestResult {
    let deferred = Deferred::rejected(SubjectError::new("TimeoutError", "took too long"));
    ensure(deferred.is_settled(), "Expected pre-rejected deferred to be settled")?;
    let outcome = deferred.settle().await;
    ensure(
        outcome == Err(SubjectError::new("TimeoutError", "took too long")),
        "Expected rejection to be preserved",
    )?;
    Ok(())
}
