// crates/assert-dsl/src/subject.rs
// ============================================================================
// Module: Subjects Under Test
// Description: Dynamically-typed values, callables, and deferred values.
// Purpose: Give checkers a uniform value model to classify and compare.
// Dependencies: crate::kind, serde_json, time, tokio::sync::OnceCell
// ============================================================================

//! ## Overview
//! A [`Subject`] is the value a checker inspects. It covers the categories a
//! behavioral suite typically asserts on (null/undefined, primitives,
//! containers, errors, functions, dates). A [`Deferred`] stands in for a value
//! that only becomes available later; it settles once and every clone
//! observes the same outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::Mutex;

use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::OnceCell;

use crate::kind::TypeName;

// ============================================================================
// SECTION: Subject Errors
// ============================================================================

/// Error value carried by subjects, callables, and rejected deferreds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct SubjectError {
    /// Error kind used by throw checkers (e.g. `TypeError`).
    pub kind: String,
    /// Free-form error message.
    pub message: String,
}

impl SubjectError {
    /// Creates an error of the given kind.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// SECTION: Callables
// ============================================================================

/// Signature shared by all callables.
type CallableFn = dyn Fn(Subject) -> Result<Subject, SubjectError> + Send + Sync;

/// Named function value that may fail with a [`SubjectError`].
///
/// # Invariants
/// - Equality is identity: two callables are equal only when they share the
///   same underlying function allocation.
#[derive(Clone)]
pub struct Callable {
    /// Display name used in labels and renderings.
    name: String,
    /// Shared function body.
    func: Arc<CallableFn>,
}

impl Callable {
    /// Wraps a function under a display name.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Subject) -> Result<Subject, SubjectError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the function with a single argument.
    ///
    /// # Errors
    ///
    /// Returns whatever [`SubjectError`] the wrapped function raises.
    pub fn call(&self, arg: Subject) -> Result<Subject, SubjectError> {
        (self.func)(arg)
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Function {}]", self.name)
    }
}

// ============================================================================
// SECTION: Subject Value
// ============================================================================

/// Dynamically-typed value under test.
#[derive(Debug, Clone, PartialEq)]
pub enum Subject {
    /// Absent value.
    Undefined,
    /// Explicit null.
    Null,
    /// Boolean value.
    Boolean(bool),
    /// Numeric value.
    Number(f64),
    /// String value.
    String(String),
    /// Ordered list of subjects.
    Array(Vec<Subject>),
    /// String-keyed mapping of subjects.
    Object(BTreeMap<String, Subject>),
    /// Error value.
    Error(SubjectError),
    /// Function value.
    Function(Callable),
    /// Point in time.
    Date(OffsetDateTime),
}

impl Subject {
    /// Builds an object subject from key/value pairs.
    pub fn object<K, V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Object(entries.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
    }

    /// Builds an array subject from items.
    pub fn array<V, I>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Returns the runtime category of this subject.
    #[must_use]
    pub const fn category(&self) -> TypeName {
        match self {
            Self::Undefined => TypeName::Undefined,
            Self::Null => TypeName::Null,
            Self::Boolean(_) => TypeName::Boolean,
            Self::Number(_) => TypeName::Number,
            Self::String(_) => TypeName::String,
            Self::Array(_) => TypeName::Array,
            Self::Object(_) => TypeName::Object,
            Self::Error(_) => TypeName::Error,
            Self::Function(_) => TypeName::Function,
            Self::Date(_) => TypeName::Date,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "\"{value}\""),
            Self::Array(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(entries) => {
                f.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Error(error) => write!(f, "{error}"),
            Self::Function(callable) => write!(f, "[Function {}]", callable.name()),
            Self::Date(date) => write!(f, "{date}"),
        }
    }
}

// ============================================================================
// SECTION: Conversions
// ============================================================================

impl From<bool> for Subject {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for Subject {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Subject {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for Subject {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Subject {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Subject {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<SubjectError> for Subject {
    fn from(value: SubjectError) -> Self {
        Self::Error(value)
    }
}

impl From<Callable> for Subject {
    fn from(value: Callable) -> Self {
        Self::Function(value)
    }
}

impl From<OffsetDateTime> for Subject {
    fn from(value: OffsetDateTime) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<Subject>> From<Vec<T>> for Subject {
    fn from(value: Vec<T>) -> Self {
        Self::array(value)
    }
}

impl<T: Into<Subject>> From<Option<T>> for Subject {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Undefined, Into::into)
    }
}

impl From<Value> for Subject {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Boolean(flag),
            Value::Number(number) => Self::Number(number.as_f64().unwrap_or(f64::NAN)),
            Value::String(text) => Self::String(text),
            Value::Array(items) => Self::array(items),
            Value::Object(entries) => Self::object(entries),
        }
    }
}

// ============================================================================
// SECTION: Deferred Values
// ============================================================================

/// Final outcome of a deferred value.
pub type Settled = Result<Subject, SubjectError>;

/// Boxed future producing a settled outcome.
type PendingFuture = Pin<Box<dyn Future<Output = Settled> + Send>>;

/// Promised subject that settles at most once.
///
/// Cloning is cheap and every clone observes the same settled outcome. The
/// future is driven by whichever caller awaits [`Deferred::settle`] first.
///
/// # Invariants
/// - Once settled, the outcome never changes.
/// - If the first awaiting caller is cancelled mid-flight, the source future
///   is lost and later callers observe an abandonment error.
#[derive(Clone)]
pub struct Deferred {
    /// Memoized outcome shared across clones.
    settled: Arc<OnceCell<Settled>>,
    /// Source future, taken by the first awaiting caller.
    pending: Arc<Mutex<Option<PendingFuture>>>,
}

impl Deferred {
    /// Wraps a future that produces the subject (or rejects).
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Settled> + Send + 'static,
    {
        Self {
            settled: Arc::new(OnceCell::new()),
            pending: Arc::new(Mutex::new(Some(Box::pin(future)))),
        }
    }

    /// Creates a deferred value that is already resolved.
    pub fn resolved(value: impl Into<Subject>) -> Self {
        Self::from_settled(Ok(value.into()))
    }

    /// Creates a deferred value that is already rejected.
    #[must_use]
    pub fn rejected(error: SubjectError) -> Self {
        Self::from_settled(Err(error))
    }

    /// Builds a deferred value from a known outcome.
    fn from_settled(outcome: Settled) -> Self {
        Self {
            settled: Arc::new(OnceCell::new_with(Some(outcome))),
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns true once the value has settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settled.initialized()
    }

    /// Awaits the settled outcome, driving the source future if needed.
    pub async fn settle(&self) -> Settled {
        self.settled.get_or_init(|| self.drive()).await.clone()
    }

    /// Takes and awaits the source future.
    async fn drive(&self) -> Settled {
        let pending = self.pending.lock().ok().and_then(|mut slot| slot.take());
        match pending {
            Some(future) => future.await,
            None => Err(SubjectError::new(
                "DeferredError",
                "deferred value was abandoned before settling",
            )),
        }
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred").field("settled", &self.is_settled()).finish()
    }
}
