//! Domain Entities
//!
//! Core entities of the polling domain.

use chrono::{DateTime, SecondsFormat, Utc};
use kernel::label::{CourseId, LectureId, QuestionId, SessionId};

use crate::domain::question::Question;
use crate::domain::value_objects::{Answer, ResponseKey};

/// Response entity - one student's answer to one question in one session
///
/// Immutable once persisted: created by the first successful submission for
/// its key, never mutated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub key: ResponseKey,
    pub question_type: String,
    pub question_prompt: String,
    pub answer: Answer,
    pub submitted_at: DateTime<Utc>,
}

impl Response {
    /// Create a new response, stamped with the current UTC time
    pub fn new(key: ResponseKey, question: &Question, answer: Answer) -> Self {
        Self {
            key,
            question_type: question.kind.type_name().to_string(),
            question_prompt: question.prompt.clone(),
            answer,
            submitted_at: Utc::now(),
        }
    }

    /// ISO-8601 timestamp with second precision, as exported
    pub fn timestamp_rfc3339(&self) -> String {
        self.submitted_at
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// ClassState entity - the per-course singleton driving the live poll
///
/// Created on first access with configured defaults; mutated only by
/// instructor actions through load-modify-save; never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassState {
    pub course: CourseId,
    pub current_lecture: LectureId,
    pub session_id: SessionId,
    pub active_question_id: Option<QuestionId>,
}

impl ClassState {
    /// Initial state for a course that has none yet
    pub fn bootstrap(course: CourseId, lecture: LectureId, session: SessionId) -> Self {
        Self {
            course,
            current_lecture: lecture,
            session_id: session,
            active_question_id: None,
        }
    }

    /// Switch to another lecture; the previous live question is cleared
    /// since question ids are scoped to their lecture's bank.
    pub fn switch_lecture(&mut self, lecture: LectureId) {
        self.current_lecture = lecture;
        self.active_question_id = None;
    }

    /// Mark a question of the current lecture live
    pub fn set_live_question(&mut self, question: QuestionId) {
        self.active_question_id = Some(question);
    }

    /// Start a new session label; lecture and live question stay as they
    /// are, only the dedup scope re-opens.
    pub fn start_session(&mut self, session: SessionId) {
        self.session_id = session;
    }
}
