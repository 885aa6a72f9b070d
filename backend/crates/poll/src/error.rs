//! Poll Error Types
//!
//! Domain-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::label::LabelError;
use thiserror::Error;

use crate::domain::question::AnswerError;

/// Poll-specific result type alias
pub type PollResult<T> = Result<T, PollError>;

/// Poll-specific error variants
///
/// Maps to HTTP status codes and converts to `AppError` for unified
/// error handling.
#[derive(Debug, Error)]
pub enum PollError {
    /// An identity field (netid, lecture, ...) failed validation
    #[error("invalid identifier: {0}")]
    InvalidLabel(#[from] LabelError),

    /// The answer failed the per-question-type validator
    #[error("incomplete answer: {0}")]
    Incomplete(#[from] AnswerError),

    /// Question id not present in the current lecture's bank
    #[error("question '{0}' not found in the current lecture")]
    QuestionNotFound(String),

    /// Submission targeted a question other than the live one
    #[error("question '{0}' is not accepting submissions")]
    QuestionNotLive(String),

    /// No question is currently live
    #[error("no question is live")]
    NoLiveQuestion,

    /// No question file exists for the requested lecture
    #[error("no question file for lecture '{0}'")]
    LectureNotFound(String),

    /// Export requested for a lecture without any recorded responses
    #[error("no responses recorded for lecture '{0}'")]
    NoResponses(String),

    /// The question bank file is malformed
    #[error("question bank for '{lecture}' is malformed: {message}")]
    BankConfig { lecture: String, message: String },

    /// Instructor key missing or incorrect
    #[error("instructor key missing or incorrect")]
    Unauthorized,

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl PollError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PollError::InvalidLabel(_) => ErrorKind::BadRequest,
            PollError::Incomplete(_) => ErrorKind::UnprocessableEntity,
            PollError::QuestionNotFound(_)
            | PollError::NoLiveQuestion
            | PollError::LectureNotFound(_)
            | PollError::NoResponses(_) => ErrorKind::NotFound,
            PollError::QuestionNotLive(_) => ErrorKind::Conflict,
            PollError::BankConfig { .. } => ErrorKind::InternalServerError,
            PollError::Unauthorized => ErrorKind::Unauthorized,
            // Connectivity problems are transient: the caller may simply
            // re-present the submit action (no automatic retry).
            PollError::Database(e) => match e {
                sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut => ErrorKind::ServiceUnavailable,
                _ => ErrorKind::InternalServerError,
            },
            PollError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PollError::Database(e) => {
                tracing::error!(error = %e, "Poll database error");
            }
            PollError::BankConfig { lecture, message } => {
                tracing::error!(lecture = %lecture, message = %message, "Malformed question bank");
            }
            PollError::Internal(msg) => {
                tracing::error!(message = %msg, "Poll internal error");
            }
            PollError::Unauthorized => {
                tracing::warn!("Rejected instructor request");
            }
            _ => {
                tracing::debug!(error = %self, "Poll error");
            }
        }
    }
}

impl From<PollError> for AppError {
    fn from(err: PollError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}

impl IntoResponse for PollError {
    fn into_response(self) -> Response {
        self.log();
        // Respond through the kernel's RFC 7807 body; server errors keep
        // their generic message, nothing sensitive is carried in Display.
        AppError::from(self).into_response()
    }
}
