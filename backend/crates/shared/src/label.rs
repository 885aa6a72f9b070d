//! Typed Identifier Labels
//!
//! Every identifier in the polling domain (course, lecture, session,
//! question, student) is an externally supplied string. `Label<T>` wraps a
//! validated, trimmed label with a phantom marker so the identifier kinds
//! cannot be mixed up.
//!
//! Usage:
//! ```
//! use kernel::label::{Label, markers};
//! type QuestionId = Label<markers::Question>;
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Maximum length of a label (in characters)
pub const LABEL_MAX_LENGTH: usize = 64;

/// Per-kind label behavior
pub trait LabelKind {
    /// Human-readable kind name, used in error messages
    const KIND: &'static str;

    /// Fold the label to lowercase on construction
    const FOLD_CASE: bool = false;
}

/// Error returned when label validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("{kind} must not be empty")]
    Empty { kind: &'static str },

    #[error("{kind} is too long ({length} chars, maximum {max})")]
    TooLong {
        kind: &'static str,
        length: usize,
        max: usize,
    },

    #[error("{kind} contains a control character")]
    ControlCharacter { kind: &'static str },
}

/// Validated, typed identifier label
///
/// # Invariants
/// - Non-empty after trimming
/// - At most [`LABEL_MAX_LENGTH`] characters
/// - No control characters
/// - Lowercase when the kind folds case (student netids)
pub struct Label<T: LabelKind> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T: LabelKind> Label<T> {
    /// Create a new label from raw input
    ///
    /// Trims surrounding whitespace, folds case when the kind requires it,
    /// and validates.
    pub fn new(input: impl AsRef<str>) -> Result<Self, LabelError> {
        let trimmed = input.as_ref().trim();
        let value = if T::FOLD_CASE {
            trimmed.to_lowercase()
        } else {
            trimmed.to_string()
        };

        if value.is_empty() {
            return Err(LabelError::Empty { kind: T::KIND });
        }

        let length = value.chars().count();
        if length > LABEL_MAX_LENGTH {
            return Err(LabelError::TooLong {
                kind: T::KIND,
                length,
                max: LABEL_MAX_LENGTH,
            });
        }

        if value.chars().any(|c| c.is_control()) {
            return Err(LabelError::ControlCharacter { kind: T::KIND });
        }

        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Rehydrate from a stored value (validated at write time)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    /// Get the label as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Convert to the owned String
    #[inline]
    pub fn into_inner(self) -> String {
        self.value
    }
}

// Manual impls: deriving would put unwanted bounds on the marker type.

impl<T: LabelKind> Clone for Label<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: LabelKind> PartialEq for Label<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: LabelKind> Eq for Label<T> {}

impl<T: LabelKind> Hash for Label<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T: LabelKind> fmt::Debug for Label<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", T::KIND, self.value)
    }
}

impl<T: LabelKind> fmt::Display for Label<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T: LabelKind> AsRef<str> for Label<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl<T: LabelKind> Serialize for Label<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T: LabelKind> Deserialize<'de> for Label<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(serde::de::Error::custom)
    }
}

/// Marker types for the identifier kinds
pub mod markers {
    use super::LabelKind;

    /// Marker for course identifiers
    pub struct Course;
    impl LabelKind for Course {
        const KIND: &'static str = "course";
    }

    /// Marker for lecture identifiers
    pub struct Lecture;
    impl LabelKind for Lecture {
        const KIND: &'static str = "lecture";
    }

    /// Marker for session labels
    pub struct Session;
    impl LabelKind for Session {
        const KIND: &'static str = "session";
    }

    /// Marker for question identifiers
    pub struct Question;
    impl LabelKind for Question {
        const KIND: &'static str = "question";
    }

    /// Marker for student identifiers; netids are case-insensitive
    pub struct Student;
    impl LabelKind for Student {
        const KIND: &'static str = "netid";
        const FOLD_CASE: bool = true;
    }
}

/// Type aliases for the identifier kinds
pub type CourseId = Label<markers::Course>;
pub type LectureId = Label<markers::Lecture>;
pub type SessionId = Label<markers::Session>;
pub type QuestionId = Label<markers::Question>;
pub type NetId = Label<markers::Student>;
