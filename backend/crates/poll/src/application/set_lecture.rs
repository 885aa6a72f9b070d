//! Set Lecture Use Case
//!
//! Instructor action: list the lectures that have a question file and
//! switch the class to one of them.

use crate::application::config::PollConfig;
use crate::application::get_state::load_or_init;
use crate::domain::entities::ClassState;
use crate::domain::repository::{ClassStateRepository, QuestionBankRepository};
use crate::error::{PollError, PollResult};
use kernel::label::LectureId;
use std::sync::Arc;

/// Set Lecture Use Case
pub struct SetLectureUseCase<R, B>
where
    R: ClassStateRepository,
    B: QuestionBankRepository,
{
    repo: Arc<R>,
    banks: Arc<B>,
    config: Arc<PollConfig>,
}

impl<R, B> SetLectureUseCase<R, B>
where
    R: ClassStateRepository,
    B: QuestionBankRepository,
{
    pub fn new(repo: Arc<R>, banks: Arc<B>, config: Arc<PollConfig>) -> Self {
        Self {
            repo,
            banks,
            config,
        }
    }

    /// Lectures with a question file, sorted
    pub async fn available(&self) -> PollResult<Vec<LectureId>> {
        self.banks.available().await
    }

    pub async fn execute(&self, lecture: String) -> PollResult<ClassState> {
        let lecture = LectureId::new(&lecture)?;

        let available = self.banks.available().await?;
        if !available.contains(&lecture) {
            return Err(PollError::LectureNotFound(lecture.to_string()));
        }

        let mut state = load_or_init(self.repo.as_ref(), &self.config).await?;
        state.switch_lecture(lecture);
        self.repo.save(&state).await?;

        tracing::info!(lecture = %state.current_lecture, "Lecture switched");

        Ok(state)
    }
}
