// crates/assert-dsl/tests/config.rs
// ============================================================================
// Module: Suite Configuration Tests
// Description: Parsing, defaults, and fail-closed validation of suite config.
// Purpose: Ensure configuration files are strictly parsed and bounded.
// Dependencies: assert_dsl, tempfile
// ============================================================================
//! ## Overview
//! Integration tests for [`SuiteConfig`] loading and validation.

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

use std::fs;
use std::path::PathBuf;

use assert_dsl::AuditSinkKind;
use assert_dsl::CaseTiming;
use assert_dsl::ConfigError;
use assert_dsl::SuiteConfig;
use support::TestResult;
use support::ensure;

// ============================================================================
// SECTION: Parsing
// ============================================================================

#[test]
fn empty_document_yields_defaults() -> TestResult {
    let config = SuiteConfig::from_toml_str("")?;
    ensure(config == SuiteConfig::default(), "Expected defaults for empty config")?;
    ensure(config.case_timing == CaseTiming::Deferred, "Expected deferred timing by default")?;
    ensure(config.limits.max_scope_depth == 32, "Expected default depth limit")?;
    ensure(config.limits.max_label_bytes == 1024, "Expected default label limit")?;
    ensure(config.audit.sink == AuditSinkKind::None, "Expected audit disabled by default")?;
    Ok(())
}

#[test]
fn full_document_is_parsed() -> TestResult {
    let config = SuiteConfig::from_toml_str(
        r#"
case_timing = "eager"

[limits]
max_scope_depth = 4
max_label_bytes = 128

[audit]
sink = "file"
path = "logs/registrations.jsonl"
"#,
    )?;
    ensure(config.case_timing == CaseTiming::Eager, "Expected eager timing")?;
    ensure(config.limits.max_scope_depth == 4, "Expected custom depth limit")?;
    ensure(config.limits.max_label_bytes == 128, "Expected custom label limit")?;
    ensure(
        config.audit.path == Some(PathBuf::from("logs/registrations.jsonl")),
        "Expected audit path",
    )?;
    Ok(())
}

#[test]
fn unknown_fields_are_rejected() -> TestResult {
    let top = SuiteConfig::from_toml_str("retries = 3");
    ensure(matches!(top, Err(ConfigError::Parse(_))), "Expected unknown top-level key to fail")?;
    let nested = SuiteConfig::from_toml_str("[limits]\nmax_cases = 3");
    ensure(matches!(nested, Err(ConfigError::Parse(_))), "Expected unknown limit key to fail")?;
    let timing = SuiteConfig::from_toml_str("case_timing = \"lazy\"");
    ensure(matches!(timing, Err(ConfigError::Parse(_))), "Expected unknown timing to fail")?;
    Ok(())
}

// ============================================================================
// SECTION: Validation
// ============================================================================

#[test]
fn limits_are_bounded() -> TestResult {
    for document in [
        "[limits]\nmax_scope_depth = 0",
        "[limits]\nmax_scope_depth = 257",
        "[limits]\nmax_label_bytes = 0",
        "[limits]\nmax_label_bytes = 65537",
    ] {
        let outcome = SuiteConfig::from_toml_str(document);
        ensure(
            matches!(outcome, Err(ConfigError::Invalid(_))),
            format!("Expected out-of-range limit to fail: {document}"),
        )?;
    }
    Ok(())
}

#[test]
fn audit_path_pairs_with_file_sink_only() -> TestResult {
    let missing = SuiteConfig::from_toml_str("[audit]\nsink = \"file\"");
    ensure(matches!(missing, Err(ConfigError::Invalid(_))), "Expected file sink to need a path")?;
    let stray = SuiteConfig::from_toml_str("[audit]\nsink = \"stderr\"\npath = \"audit.log\"");
    ensure(matches!(stray, Err(ConfigError::Invalid(_))), "Expected stderr sink to reject a path")?;
    let empty = SuiteConfig::from_toml_str("[audit]\nsink = \"file\"\npath = \"\"");
    ensure(matches!(empty, Err(ConfigError::Invalid(_))), "Expected empty path to fail")?;
    Ok(())
}

// ============================================================================
// SECTION: Loading
// ============================================================================

#[test]
fn load_reads_explicit_path() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("assert-dsl.toml");
    fs::write(&path, "case_timing = \"eager\"\n")?;
    let config = SuiteConfig::load(Some(path.as_path()))?;
    ensure(config.case_timing == CaseTiming::Eager, "Expected file contents to be applied")?;
    Ok(())
}

#[test]
fn load_rejects_missing_oversized_and_non_utf8_files() -> TestResult {
    let dir = tempfile::tempdir()?;
    let missing = SuiteConfig::load(Some(dir.path().join("absent.toml").as_path()));
    ensure(matches!(missing, Err(ConfigError::Io(_))), "Expected missing file to fail")?;

    let oversized = dir.path().join("oversized.toml");
    fs::write(&oversized, format!("# {}\n", "x".repeat(64 * 1024)))?;
    let outcome = SuiteConfig::load(Some(oversized.as_path()));
    ensure(matches!(outcome, Err(ConfigError::Invalid(_))), "Expected size limit to apply")?;

    let binary = dir.path().join("binary.toml");
    fs::write(&binary, [0xff_u8, 0xfe, 0x00])?;
    let outcome = SuiteConfig::load(Some(binary.as_path()));
    ensure(matches!(outcome, Err(ConfigError::Invalid(_))), "Expected utf-8 check to apply")?;
    Ok(())
}

#[test]
fn load_rejects_overlong_path_components() -> TestResult {
    let path = PathBuf::from("a".repeat(300)).join("assert-dsl.toml");
    let outcome = SuiteConfig::load(Some(path.as_path()));
    ensure(matches!(outcome, Err(ConfigError::Invalid(_))), "Expected component limit to apply")?;
    Ok(())
}
