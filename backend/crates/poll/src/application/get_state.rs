//! Get Class State Use Case
//!
//! Loads the per-course class state, creating it with configured defaults
//! on first access, and resolves the live question for rendering.

use crate::application::config::PollConfig;
use crate::domain::entities::ClassState;
use crate::domain::question::Question;
use crate::domain::repository::{ClassStateRepository, QuestionBankRepository, ResponseRepository};
use crate::domain::value_objects::ResponseKey;
use crate::error::PollResult;
use kernel::label::NetId;
use std::sync::Arc;

/// Load the class state for the configured course, bootstrapping it on
/// first access. This is the explicit load half of the load-modify-save
/// contract every instructor action follows.
pub(crate) async fn load_or_init<S>(state_repo: &S, config: &PollConfig) -> PollResult<ClassState>
where
    S: ClassStateRepository,
{
    if let Some(state) = state_repo.load(&config.course).await? {
        return Ok(state);
    }

    let state = ClassState::bootstrap(
        config.course.clone(),
        config.default_lecture.clone(),
        config.default_session.clone(),
    );
    state_repo.save(&state).await?;

    tracing::info!(
        course = %state.course,
        lecture = %state.current_lecture,
        "Bootstrapped class state"
    );

    Ok(state)
}

/// Output DTO for get class state
#[derive(Debug, Clone)]
pub struct StateOutput {
    pub state: ClassState,
    pub live_question: Option<Question>,
    /// Whether the given student already submitted for the live question;
    /// only present when a netid was supplied and a question is live
    pub already_submitted: Option<bool>,
}

/// Get Class State Use Case
pub struct GetClassStateUseCase<R, B>
where
    R: ResponseRepository + ClassStateRepository,
    B: QuestionBankRepository,
{
    repo: Arc<R>,
    banks: Arc<B>,
    config: Arc<PollConfig>,
}

impl<R, B> GetClassStateUseCase<R, B>
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

    pub async fn execute(&self, netid: Option<String>) -> PollResult<StateOutput> {
        let state = load_or_init(self.repo.as_ref(), &self.config).await?;

        let live_question = match &state.active_question_id {
            Some(question_id) => match self.banks.load(&state.current_lecture).await {
                Ok(bank) => bank.get(question_id).cloned(),
                Err(e) => {
                    // A missing or malformed bank renders as "no live
                    // question" rather than failing the whole state view.
                    tracing::warn!(
                        lecture = %state.current_lecture,
                        error = %e,
                        "Could not resolve live question"
                    );
                    None
                }
            },
            None => None,
        };

        let already_submitted = match (netid, &live_question) {
            (Some(raw), Some(question)) => {
                let netid = NetId::new(&raw)?;
                let key = ResponseKey::new(
                    state.course.clone(),
                    state.current_lecture.clone(),
                    state.session_id.clone(),
                    question.question_id.clone(),
                    netid,
                );
                Some(self.repo.exists(&key).await?)
            }
            _ => None,
        };

        Ok(StateOutput {
            state,
            live_question,
            already_submitted,
        })
    }
}
