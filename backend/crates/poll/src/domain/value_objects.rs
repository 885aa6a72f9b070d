//! Domain Value Objects
//!
//! Immutable value types for the polling domain.

use std::collections::BTreeMap;
use std::fmt;

use kernel::label::{CourseId, LectureId, NetId, QuestionId, SessionId};
use serde::{Deserialize, Serialize};

/// Identity key of a response
///
/// One response may exist per key, ever. The key is deterministic by
/// construction and doubles as the store key, so the store's uniqueness
/// guarantee on it is the whole dedup mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResponseKey {
    pub course: CourseId,
    pub lecture: LectureId,
    pub session: SessionId,
    pub question: QuestionId,
    pub netid: NetId,
}

impl ResponseKey {
    pub fn new(
        course: CourseId,
        lecture: LectureId,
        session: SessionId,
        question: QuestionId,
        netid: NetId,
    ) -> Self {
        Self {
            course,
            lecture,
            session,
            question,
            netid,
        }
    }

    /// Deterministic store key:
    /// `{course}__{lecture}__{session}__{question_id}__{netid}`, with `/`
    /// replaced by `_` so the key is safe as a document path segment.
    pub fn storage_key(&self) -> String {
        format!(
            "{}__{}__{}__{}__{}",
            self.course, self.lecture, self.session, self.question, self.netid
        )
        .replace('/', "_")
    }
}

impl fmt::Display for ResponseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}

/// A submitted answer value
///
/// Three shapes, matching the question types: a plain string (text and
/// single-choice), a string array (multi-choice), or a keyed string map
/// (multi-field). Untagged on the wire: the JSON shape selects the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Selections(Vec<String>),
    Fields(BTreeMap<String, String>),
}

impl Answer {
    /// Shape name used in validation errors
    pub fn shape(&self) -> &'static str {
        match self {
            Answer::Text(_) => "a string",
            Answer::Selections(_) => "a list of selections",
            Answer::Fields(_) => "a map of fields",
        }
    }

    /// Flatten for CSV export: strings as-is, arrays and maps as JSON text
    pub fn to_csv_field(&self) -> String {
        match self {
            Answer::Text(s) => s.clone(),
            other => serde_json::to_string(other).unwrap_or_default(),
        }
    }
}
