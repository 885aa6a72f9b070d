//! Submit Response Use Case
//!
//! The write path of the Submission Guard: validate the identity inputs and
//! the answer, then attempt the atomic conditional-create. A duplicate
//! submission is reported as `written=false`, never as an error.

use crate::application::config::PollConfig;
use crate::application::get_state::load_or_init;
use crate::domain::entities::Response;
use crate::domain::repository::{ClassStateRepository, QuestionBankRepository, ResponseRepository};
use crate::domain::value_objects::{Answer, ResponseKey};
use crate::error::{PollError, PollResult};
use kernel::label::{NetId, QuestionId};
use std::sync::Arc;

/// Input DTO for submit response
#[derive(Debug, Clone)]
pub struct SubmitResponseInput {
    pub netid: String,
    pub question_id: String,
    pub answer: Answer,
}

/// Output DTO for submit response
#[derive(Debug, Clone)]
pub struct SubmitResponseOutput {
    /// True when this call persisted the response; false when one already
    /// existed for the identity key (idempotent no-op)
    pub written: bool,
}

/// Submit Response Use Case
pub struct SubmitResponseUseCase<R, B>
where
    R: ResponseRepository + ClassStateRepository,
    B: QuestionBankRepository,
{
    repo: Arc<R>,
    banks: Arc<B>,
    config: Arc<PollConfig>,
}

impl<R, B> SubmitResponseUseCase<R, B>
where
    R: ResponseRepository + ClassStateRepository,
    B: QuestionBankRepository,
{
    pub fn new(repo: Arc<R>, banks: Arc<B>, config: Arc<PollConfig>) -> Self {
        Self {
            repo,
            banks,
            config,
        }
    }

    pub async fn execute(&self, input: SubmitResponseInput) -> PollResult<SubmitResponseOutput> {
        let netid = NetId::new(&input.netid)?;
        let question_id = QuestionId::new(&input.question_id)?;

        let state = load_or_init(self.repo.as_ref(), &self.config).await?;

        // Only the live question accepts submissions.
        let live = state
            .active_question_id
            .clone()
            .ok_or(PollError::NoLiveQuestion)?;
        if live != question_id {
            return Err(PollError::QuestionNotLive(question_id.to_string()));
        }

        let bank = self.banks.load(&state.current_lecture).await?;
        let question = bank
            .get(&question_id)
            .ok_or_else(|| PollError::QuestionNotFound(question_id.to_string()))?;

        // Rejected answers never reach the store.
        question.validate(&input.answer)?;

        let key = ResponseKey::new(
            state.course,
            state.current_lecture,
            state.session_id,
            question_id,
            netid,
        );
        let response = Response::new(key, question, input.answer);

        let written = self.repo.insert_if_absent(&response).await?;

        if written {
            tracing::info!(key = %response.key, "Response recorded");
        } else {
            tracing::info!(key = %response.key, "Duplicate submission, nothing changed");
        }

        Ok(SubmitResponseOutput { written })
    }
}
