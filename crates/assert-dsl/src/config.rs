// crates/assert-dsl/src/config.rs
// ============================================================================
// Module: Suite Configuration
// Description: Configuration loading and validation for suite registration.
// Purpose: Replace process-wide assertion setup with explicit, validated config.
// Dependencies: crate::registry, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! A [`SuiteConfig`] is handed to [`Suite`](crate::Suite) at construction. It
//! is loaded from a TOML file (explicit path, `ASSERT_DSL_CONFIG`, or
//! `assert-dsl.toml`) with strict size and path limits; invalid configuration
//! fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::registry::CaseTiming;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "assert-dsl.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "ASSERT_DSL_CONFIG";
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default maximum scope nesting depth.
const DEFAULT_MAX_SCOPE_DEPTH: usize = 32;
/// Upper bound accepted for `limits.max_scope_depth`.
const MAX_SCOPE_DEPTH_CEILING: usize = 256;
/// Default maximum label size in bytes.
const DEFAULT_MAX_LABEL_BYTES: usize = 1024;
/// Upper bound accepted for `limits.max_label_bytes`.
const MAX_LABEL_BYTES_CEILING: usize = 64 * 1024;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Suite registration configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuiteConfig {
    /// When table-driven cases invoke the function under test.
    pub case_timing: CaseTiming,
    /// Registration limits.
    pub limits: LimitsConfig,
    /// Audit sink selection.
    pub audit: AuditConfig,
}

/// Registration limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum nesting depth of scopes.
    pub max_scope_depth: usize,
    /// Maximum size of a scope or case label in bytes.
    pub max_label_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_scope_depth: DEFAULT_MAX_SCOPE_DEPTH,
            max_label_bytes: DEFAULT_MAX_LABEL_BYTES,
        }
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Sink kind.
    pub sink: AuditSinkKind,
    /// Log file path (file sink only).
    pub path: Option<PathBuf>,
}

/// Available audit sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Drop all events.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `audit.path`.
    File,
}

// ============================================================================
// SECTION: Loading & Validation
// ============================================================================

impl SuiteConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.limits.validate()?;
        self.audit.validate()
    }
}

impl LimitsConfig {
    /// Validates limit bounds.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_scope_depth == 0 || self.max_scope_depth > MAX_SCOPE_DEPTH_CEILING {
            return Err(ConfigError::Invalid(format!(
                "limits.max_scope_depth must be between 1 and {MAX_SCOPE_DEPTH_CEILING}"
            )));
        }
        if self.max_label_bytes == 0 || self.max_label_bytes > MAX_LABEL_BYTES_CEILING {
            return Err(ConfigError::Invalid(format!(
                "limits.max_label_bytes must be between 1 and {MAX_LABEL_BYTES_CEILING}"
            )));
        }
        Ok(())
    }
}

impl AuditConfig {
    /// Validates sink/path pairing.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required for the file sink".to_string()))
            }
            (AuditSinkKind::File, Some(path)) => {
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::Invalid("audit.path must be non-empty".to_string()));
                }
                validate_path(path)
            }
            (_, Some(_)) => {
                Err(ConfigError::Invalid("audit.path is only valid for the file sink".to_string()))
            }
            (_, None) => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from an explicit path or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates a path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}
