// crates/assert-dsl/src/kind.rs
// ============================================================================
// Module: Discriminators
// Description: Type-name and falsey-kind discriminators with lookup tables.
// Purpose: Map closed discriminator sets to predicate functions.
// Dependencies: crate::{error, subject}, thiserror
// ============================================================================

//! ## Overview
//! Checkers are specialized by a discriminator. Rather than forwarding a raw
//! string into an assertion engine, each discriminator is a closed enum whose
//! variants index a static table holding the label fragment and predicate
//! used by the checker. String names are accepted through [`FromStr`] so
//! authored tables can still refer to categories by name.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::error::AssertionFailure;
use crate::subject::Subject;

// ============================================================================
// SECTION: Parse Errors
// ============================================================================

/// Error returned when a discriminator name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {family} `{name}`")]
pub struct KindParseError {
    /// Discriminator family (`type name` or `falsey kind`).
    pub family: &'static str,
    /// The unrecognized input.
    pub name: String,
}

// ============================================================================
// SECTION: Type Names
// ============================================================================

/// Runtime category of a [`Subject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    /// String-keyed mapping.
    Object,
    /// Ordered list.
    Array,
    /// Boolean.
    Boolean,
    /// String.
    String,
    /// Number.
    Number,
    /// Error value.
    Error,
    /// Function value.
    Function,
    /// Point in time.
    Date,
    /// Explicit null.
    Null,
    /// Absent value.
    Undefined,
}

/// Predicate deciding whether a subject belongs to a category.
pub type TypePredicate = fn(&Subject) -> bool;

/// Lookup entry for one type name.
struct TypeEntry {
    /// Canonical lowercase name.
    name: &'static str,
    /// Phrase used after "should be".
    phrase: &'static str,
    /// Category predicate.
    predicate: TypePredicate,
}

/// Type table indexed by `TypeName as usize`.
static TYPE_TABLE: [TypeEntry; 10] = [
    TypeEntry {
        name: "object",
        phrase: "an object",
        predicate: |subject| matches!(subject, Subject::Object(_)),
    },
    TypeEntry {
        name: "array",
        phrase: "an array",
        predicate: |subject| matches!(subject, Subject::Array(_)),
    },
    TypeEntry {
        name: "boolean",
        phrase: "a boolean",
        predicate: |subject| matches!(subject, Subject::Boolean(_)),
    },
    TypeEntry {
        name: "string",
        phrase: "a string",
        predicate: |subject| matches!(subject, Subject::String(_)),
    },
    TypeEntry {
        name: "number",
        phrase: "a number",
        predicate: |subject| matches!(subject, Subject::Number(_)),
    },
    TypeEntry {
        name: "error",
        phrase: "an error",
        predicate: |subject| matches!(subject, Subject::Error(_)),
    },
    TypeEntry {
        name: "function",
        phrase: "a function",
        predicate: |subject| matches!(subject, Subject::Function(_)),
    },
    TypeEntry {
        name: "date",
        phrase: "a date",
        predicate: |subject| matches!(subject, Subject::Date(_)),
    },
    TypeEntry {
        name: "null",
        phrase: "null",
        predicate: |subject| matches!(subject, Subject::Null),
    },
    TypeEntry {
        name: "undefined",
        phrase: "undefined",
        predicate: |subject| matches!(subject, Subject::Undefined),
    },
];

impl TypeName {
    /// Every type name, in table order.
    pub const ALL: [Self; 10] = [
        Self::Object,
        Self::Array,
        Self::Boolean,
        Self::String,
        Self::Number,
        Self::Error,
        Self::Function,
        Self::Date,
        Self::Null,
        Self::Undefined,
    ];

    /// Returns the table entry for this type name.
    fn entry(self) -> &'static TypeEntry {
        &TYPE_TABLE[self as usize]
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Returns the phrase used in case labels (e.g. "a number").
    #[must_use]
    pub fn phrase(self) -> &'static str {
        self.entry().phrase
    }

    /// Returns the category predicate.
    #[must_use]
    pub fn predicate(self) -> TypePredicate {
        self.entry().predicate
    }

    /// Returns true when `subject` belongs to this category.
    #[must_use]
    pub fn matches(self, subject: &Subject) -> bool {
        (self.predicate())(subject)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TypeName {
    type Err = KindParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|candidate| candidate.name() == normalized).ok_or_else(|| {
            KindParseError {
                family: "type name",
                name: value.to_string(),
            }
        })
    }
}

// ============================================================================
// SECTION: Falsey Kinds
// ============================================================================

/// Named category of "absence" checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FalseyKind {
    /// Subject is explicitly null.
    Null,
    /// Subject is absent.
    Undefined,
    /// Subject is an empty string, array, or object.
    Empty,
}

/// Predicate deciding falsey-kind membership.
///
/// Returns an [`AssertionFailure`] when the subject cannot be classified at
/// all (e.g. emptiness of a number).
pub type FalseyPredicate = fn(&Subject) -> Result<bool, AssertionFailure>;

/// Lookup entry for one falsey kind.
struct FalseyEntry {
    /// Canonical lowercase name.
    name: &'static str,
    /// Predicate for the kind.
    predicate: FalseyPredicate,
}

/// Falsey table indexed by `FalseyKind as usize`.
static FALSEY_TABLE: [FalseyEntry; 3] = [
    FalseyEntry {
        name: "null",
        predicate: |subject| Ok(matches!(subject, Subject::Null)),
    },
    FalseyEntry {
        name: "undefined",
        predicate: |subject| Ok(matches!(subject, Subject::Undefined)),
    },
    FalseyEntry {
        name: "empty",
        predicate: is_empty,
    },
];

/// Emptiness is only defined for containers.
fn is_empty(subject: &Subject) -> Result<bool, AssertionFailure> {
    match subject {
        Subject::String(text) => Ok(text.is_empty()),
        Subject::Array(items) => Ok(items.is_empty()),
        Subject::Object(entries) => Ok(entries.is_empty()),
        other => Err(AssertionFailure::mismatch(
            format!("emptiness is undefined for {}", other.category().phrase()),
            "a string, array, or object",
            other.to_string(),
        )),
    }
}

impl FalseyKind {
    /// Every falsey kind, in table order.
    pub const ALL: [Self; 3] = [Self::Null, Self::Undefined, Self::Empty];

    /// Returns the table entry for this kind.
    fn entry(self) -> &'static FalseyEntry {
        &FALSEY_TABLE[self as usize]
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Returns the kind predicate.
    #[must_use]
    pub fn predicate(self) -> FalseyPredicate {
        self.entry().predicate
    }

    /// Classifies `subject` against this kind.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionFailure`] when the kind does not apply to the
    /// subject's category.
    pub fn classify(self, subject: &Subject) -> Result<bool, AssertionFailure> {
        (self.predicate())(subject)
    }
}

impl fmt::Display for FalseyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FalseyKind {
    type Err = KindParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|candidate| candidate.name() == normalized).ok_or_else(|| {
            KindParseError {
                family: "falsey kind",
                name: value.to_string(),
            }
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions are permitted."
    )]

    use super::FalseyKind;
    use super::TypeName;
    use crate::subject::Subject;

    #[test]
    fn type_table_is_indexed_by_discriminant() {
        for type_name in TypeName::ALL {
            let parsed: TypeName = type_name.name().parse().unwrap();
            assert_eq!(parsed, type_name);
        }
    }

    #[test]
    fn falsey_table_is_indexed_by_discriminant() {
        for kind in FalseyKind::ALL {
            let parsed: FalseyKind = kind.name().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn type_predicates_agree_with_category() {
        let samples = [
            Subject::Undefined,
            Subject::Null,
            Subject::from(true),
            Subject::from(1.5),
            Subject::from("text"),
            Subject::array([1, 2]),
            Subject::object([("a", 1)]),
        ];
        for sample in &samples {
            for type_name in TypeName::ALL {
                assert_eq!(type_name.matches(sample), sample.category() == type_name);
            }
        }
    }

    #[test]
    fn emptiness_rejects_non_containers() {
        assert!(FalseyKind::Empty.classify(&Subject::Null).is_err());
        assert!(FalseyKind::Empty.classify(&Subject::from(0)).is_err());
        assert!(FalseyKind::Empty.classify(&Subject::from("")).unwrap());
        assert!(!FalseyKind::Empty.classify(&Subject::array([1])).unwrap());
    }

    #[test]
    fn parse_is_case_insensitive_and_rejects_unknown_names() {
        assert_eq!(" Number ".parse::<TypeName>().unwrap(), TypeName::Number);
        let error = "integer".parse::<TypeName>().unwrap_err();
        assert_eq!(error.name, "integer");
        assert!("falsy".parse::<FalseyKind>().is_err());
    }
}
