// crates/assert-dsl/src/suite.rs
// ============================================================================
// Module: Recording Suite
// Description: In-memory registrar that records the scope/case tree.
// Purpose: Host checker registrations without an external test runner.
// Dependencies: crate::{audit, config, error, registry}
// ============================================================================

//! ## Overview
//! [`Suite`] implements [`Registrar`] by recording every scope and case in
//! registration order. It enforces label and nesting limits from
//! [`SuiteConfig`], reports each registration to a
//! [`RegistrationAuditSink`], and hands recorded cases back to the caller for
//! execution. It does not schedule or report case outcomes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::audit::NoopAuditSink;
use crate::audit::RegistrationAuditSink;
use crate::audit::RegistrationEvent;
use crate::audit::sink_from_config;
use crate::config::ConfigError;
use crate::config::SuiteConfig;
use crate::error::CaseResult;
use crate::error::RegistrationError;
use crate::error::RegistrationResult;
use crate::registry::CaseBody;
use crate::registry::CaseTiming;
use crate::registry::Registrar;
use crate::registry::ScopeBody;

// ============================================================================
// SECTION: Recorded Tree
// ============================================================================

/// One registered leaf case.
#[derive(Debug)]
pub struct LeafCase {
    /// Labels of the enclosing scopes, outermost first.
    path: Vec<String>,
    /// Case label.
    label: String,
    /// Body executed by the runner.
    body: CaseBody,
}

impl LeafCase {
    /// Returns the case label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the enclosing scope labels, outermost first.
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Returns the scope labels and case label joined with ` > `.
    #[must_use]
    pub fn full_name(&self) -> String {
        let mut parts: Vec<&str> = self.path.iter().map(String::as_str).collect();
        parts.push(&self.label);
        parts.join(" > ")
    }

    /// Returns true when the body awaits a deferred subject.
    #[must_use]
    pub const fn is_eventual(&self) -> bool {
        self.body.is_eventual()
    }

    /// Executes the case body.
    ///
    /// # Errors
    ///
    /// Returns the [`AssertionFailure`](crate::AssertionFailure) raised by the body.
    pub async fn run(self) -> CaseResult {
        self.body.run().await
    }
}

/// Node in the recorded tree.
#[derive(Debug)]
pub enum Node {
    /// Nested scope.
    Scope(Scope),
    /// Leaf case.
    Case(LeafCase),
}

/// Named group of scopes and cases.
#[derive(Debug, Default)]
pub struct Scope {
    /// Scope label (empty for the root).
    label: String,
    /// Children in registration order.
    nodes: Vec<Node>,
}

impl Scope {
    /// Creates an empty scope.
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            nodes: Vec::new(),
        }
    }

    /// Returns the scope label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns children in registration order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns nested scopes in registration order.
    pub fn scopes(&self) -> impl Iterator<Item = &Self> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Scope(scope) => Some(scope),
            Node::Case(_) => None,
        })
    }

    /// Returns the number of leaf cases in this scope and below.
    #[must_use]
    pub fn case_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| match node {
                Node::Scope(scope) => scope.case_count(),
                Node::Case(_) => 1,
            })
            .sum()
    }

    /// Appends leaf cases depth-first.
    fn collect_cases<'a>(&'a self, out: &mut Vec<&'a LeafCase>) {
        for node in &self.nodes {
            match node {
                Node::Scope(scope) => scope.collect_cases(out),
                Node::Case(case) => out.push(case),
            }
        }
    }

    /// Moves leaf cases out depth-first.
    fn drain_cases(self, out: &mut Vec<LeafCase>) {
        for node in self.nodes {
            match node {
                Node::Scope(scope) => scope.drain_cases(out),
                Node::Case(case) => out.push(case),
            }
        }
    }
}

// ============================================================================
// SECTION: Suite
// ============================================================================

/// Recording registrar.
///
/// # Invariants
/// - `open` holds the scopes currently being registered, innermost last.
/// - Completed scopes are attached to their parent only when their body
///   succeeds; a dropped scope is reported as `scope_discarded`.
/// - `config` has passed [`SuiteConfig::validate`].
pub struct Suite {
    /// Registration configuration.
    config: SuiteConfig,
    /// Audit sink receiving registration events.
    audit: Arc<dyn RegistrationAuditSink>,
    /// Top-level scope.
    root: Scope,
    /// Scopes currently open.
    open: Vec<Scope>,
}

impl Suite {
    /// Creates a suite that discards audit events.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `config` fails validation.
    pub fn new(config: SuiteConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_validated(config))
    }

    /// Creates a suite with the audit sink selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails or the sink cannot be opened.
    pub fn from_config(config: SuiteConfig) -> Result<Self, ConfigError> {
        let suite = Self::new(config)?;
        let audit = sink_from_config(&suite.config.audit)
            .map_err(|err| ConfigError::Io(err.to_string()))?;
        Ok(suite.with_audit_sink(audit))
    }

    /// Builds a suite from configuration that already passed validation.
    fn with_validated(config: SuiteConfig) -> Self {
        Self {
            config,
            audit: Arc::new(NoopAuditSink),
            root: Scope::default(),
            open: Vec::new(),
        }
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn RegistrationAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Returns the top-level scope.
    #[must_use]
    pub const fn root(&self) -> &Scope {
        &self.root
    }

    /// Returns the number of registered leaf cases.
    #[must_use]
    pub fn case_count(&self) -> usize {
        self.root.case_count()
    }

    /// Returns registered leaf cases depth-first.
    #[must_use]
    pub fn cases(&self) -> Vec<&LeafCase> {
        let mut out = Vec::new();
        self.root.collect_cases(&mut out);
        out
    }

    /// Consumes the suite, returning leaf cases depth-first.
    #[must_use]
    pub fn into_cases(self) -> Vec<LeafCase> {
        let mut out = Vec::new();
        self.root.drain_cases(&mut out);
        out
    }

    /// Returns the scope currently receiving registrations.
    fn current(&mut self) -> &mut Scope {
        self.open.last_mut().unwrap_or(&mut self.root)
    }

    /// Returns labels of the open scopes.
    fn path(&self) -> Vec<String> {
        self.open.iter().map(|scope| scope.label.clone()).collect()
    }

    /// Checks a label against configured limits.
    fn check_label(&self, target: &'static str, label: &str) -> RegistrationResult {
        if label.trim().is_empty() {
            return Err(RegistrationError::EmptyLabel {
                target,
            });
        }
        let max_bytes = self.config.limits.max_label_bytes;
        if label.len() > max_bytes {
            return Err(RegistrationError::LabelTooLong {
                target,
                max_bytes,
                actual_bytes: label.len(),
            });
        }
        Ok(())
    }

    /// Records a rejection and returns the error.
    fn reject(&self, label: &str, error: RegistrationError) -> RegistrationError {
        self.audit.record(&RegistrationEvent::rejected(self.path(), label, &error));
        error
    }
}

impl Default for Suite {
    fn default() -> Self {
        Self::with_validated(SuiteConfig::default())
    }
}

// ============================================================================
// SECTION: Registrar Implementation
// ============================================================================

impl Registrar for Suite {
    fn describe(&mut self, label: &str, body: &mut ScopeBody<'_>) -> RegistrationResult {
        self.check_label("scope", label).map_err(|err| self.reject(label, err))?;
        let max_depth = self.config.limits.max_scope_depth;
        let depth = self.open.len() + 1;
        if depth > max_depth {
            return Err(self.reject(
                label,
                RegistrationError::ScopeTooDeep {
                    max_depth,
                    actual_depth: depth,
                },
            ));
        }
        self.audit.record(&RegistrationEvent::scope_opened(self.path(), label));
        self.open.push(Scope::new(label));
        let outcome = body(self);
        if let Some(scope) = self.open.pop() {
            match &outcome {
                Ok(()) => self.current().nodes.push(Node::Scope(scope)),
                Err(error) => {
                    let event = RegistrationEvent::scope_discarded(self.path(), label, error);
                    self.audit.record(&event);
                }
            }
        }
        outcome
    }

    fn it(&mut self, label: &str, body: CaseBody) -> RegistrationResult {
        self.check_label("case", label).map_err(|err| self.reject(label, err))?;
        let path = self.path();
        let event = RegistrationEvent::case_registered(path.clone(), label, body.is_eventual());
        self.audit.record(&event);
        self.current().nodes.push(Node::Case(LeafCase {
            path,
            label: label.to_string(),
            body,
        }));
        Ok(())
    }

    fn case_timing(&self) -> CaseTiming {
        self.config.case_timing
    }
}
