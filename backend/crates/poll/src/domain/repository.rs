//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::{ClassState, Response};
use crate::domain::question::QuestionBank;
use crate::domain::value_objects::ResponseKey;
use crate::error::PollResult;
use kernel::label::{CourseId, LectureId, QuestionId, SessionId};

/// Response repository trait
///
/// `insert_if_absent` is the Submission Guard: a single atomic
/// conditional-create keyed on the identity key. Implementations must not
/// split it into a read followed by a write.
#[trait_variant::make(ResponseRepository: Send)]
pub trait LocalResponseRepository {
    /// Persist the response unless one already exists for its identity key.
    /// Returns `true` when written, `false` when the key was already taken
    /// (no mutation in that case).
    async fn insert_if_absent(&self, response: &Response) -> PollResult<bool>;

    /// Existence check for an identity key; no side effect
    async fn exists(&self, key: &ResponseKey) -> PollResult<bool>;

    /// Fetch the response stored under an identity key
    async fn find(&self, key: &ResponseKey) -> PollResult<Option<Response>>;

    /// All responses to one question in one session, in submission order
    async fn list_for_question(
        &self,
        course: &CourseId,
        lecture: &LectureId,
        session: &SessionId,
        question: &QuestionId,
    ) -> PollResult<Vec<Response>>;

    /// All responses of a lecture across sessions, in submission order
    async fn list_for_lecture(
        &self,
        course: &CourseId,
        lecture: &LectureId,
    ) -> PollResult<Vec<Response>>;
}

/// ClassState repository trait
///
/// Callers follow load-modify-save; `save` is an atomic upsert of the
/// per-course singleton row.
#[trait_variant::make(ClassStateRepository: Send)]
pub trait LocalClassStateRepository {
    /// Load the state for a course, if any exists yet
    async fn load(&self, course: &CourseId) -> PollResult<Option<ClassState>>;

    /// Create or replace the state for its course
    async fn save(&self, state: &ClassState) -> PollResult<()>;
}

/// Question bank source trait
///
/// Banks are external configuration, read-only at runtime.
#[trait_variant::make(QuestionBankRepository: Send)]
pub trait LocalQuestionBankRepository {
    /// Lectures that have a question file
    async fn available(&self) -> PollResult<Vec<LectureId>>;

    /// Load the bank for one lecture
    async fn load(&self, lecture: &LectureId) -> PollResult<QuestionBank>;
}
