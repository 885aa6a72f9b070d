//! Live In-Class Polling Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, question model, tally, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database and question-file implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Submission Model
//! - One response per (course, lecture, session, question, student), ever
//! - Enforced by a single atomic conditional-create on the identity key
//! - A duplicate submission is an idempotent no-op, not an error
//! - Tally and export reads are unsynchronized snapshot reads

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::PollConfig;
pub use error::{PollError, PollResult};
pub use infra::postgres::PgPollRepository;
pub use infra::question_files::FsQuestionBanks;
pub use presentation::router::poll_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult, OptionExt, ResultExt},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
