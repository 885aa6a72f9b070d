//! Set Live Question Use Case
//!
//! Instructor action: designate the single question of the current lecture
//! that accepts submissions.

use crate::application::config::PollConfig;
use crate::application::get_state::load_or_init;
use crate::domain::entities::ClassState;
use crate::domain::repository::{ClassStateRepository, QuestionBankRepository};
use crate::error::{PollError, PollResult};
use kernel::label::QuestionId;
use std::sync::Arc;

/// Set Live Question Use Case
pub struct SetLiveQuestionUseCase<R, B>
where
    R: ClassStateRepository,
    B: QuestionBankRepository,
{
    repo: Arc<R>,
    banks: Arc<B>,
    config: Arc<PollConfig>,
}

impl<R, B> SetLiveQuestionUseCase<R, B>
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

    pub async fn execute(&self, question_id: String) -> PollResult<ClassState> {
        let question_id = QuestionId::new(&question_id)?;

        let mut state = load_or_init(self.repo.as_ref(), &self.config).await?;

        let bank = self.banks.load(&state.current_lecture).await?;
        if bank.get(&question_id).is_none() {
            return Err(PollError::QuestionNotFound(question_id.to_string()));
        }

        state.set_live_question(question_id);
        self.repo.save(&state).await?;

        tracing::info!(
            lecture = %state.current_lecture,
            question = ?state.active_question_id,
            "Question is live"
        );

        Ok(state)
    }
}
