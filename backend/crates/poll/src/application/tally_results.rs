//! Tally Results Use Case
//!
//! Tallies the live (or a named) question for the current session. The read
//! is an unsynchronized snapshot; a submission committed while the query
//! runs may be missed and shows up on the next refresh.

use crate::application::config::PollConfig;
use crate::application::get_state::load_or_init;
use crate::domain::entities::Response;
use crate::domain::question::Question;
use crate::domain::repository::{ClassStateRepository, QuestionBankRepository, ResponseRepository};
use crate::domain::services::{Tally, tally_responses};
use crate::error::{PollError, PollResult};
use kernel::label::QuestionId;
use std::sync::Arc;

/// How many raw responses the instructor detail view carries
const LATEST_LIMIT: usize = 20;

/// Output DTO for tally results
#[derive(Debug, Clone)]
pub struct ResultsOutput {
    pub question: Question,
    pub total: u64,
    pub tally: Tally,
    /// Most recent raw responses, newest first; instructor view only
    pub latest: Option<Vec<Response>>,
}

/// Tally Results Use Case
pub struct TallyResultsUseCase<R, B>
where
    R: ResponseRepository + ClassStateRepository,
    B: QuestionBankRepository,
{
    repo: Arc<R>,
    banks: Arc<B>,
    config: Arc<PollConfig>,
}

impl<R, B> TallyResultsUseCase<R, B>
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

    pub async fn execute(
        &self,
        question_id: Option<String>,
        include_latest: bool,
    ) -> PollResult<ResultsOutput> {
        let state = load_or_init(self.repo.as_ref(), &self.config).await?;

        let question_id = match question_id {
            Some(raw) => QuestionId::new(&raw)?,
            None => state
                .active_question_id
                .clone()
                .ok_or(PollError::NoLiveQuestion)?,
        };

        let bank = self.banks.load(&state.current_lecture).await?;
        let question = bank
            .get(&question_id)
            .cloned()
            .ok_or_else(|| PollError::QuestionNotFound(question_id.to_string()))?;

        let rows = self
            .repo
            .list_for_question(
                &state.course,
                &state.current_lecture,
                &state.session_id,
                &question_id,
            )
            .await?;

        let total = rows.len() as u64;
        let tally = tally_responses(&question, &rows);
        let latest = include_latest
            .then(|| rows.iter().rev().take(LATEST_LIMIT).cloned().collect::<Vec<_>>());

        Ok(ResultsOutput {
            question,
            total,
            tally,
            latest,
        })
    }
}
