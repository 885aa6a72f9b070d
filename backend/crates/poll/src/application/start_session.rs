//! Start Session Use Case
//!
//! Instructor action: set a new session label. The session is part of the
//! identity key, so a new label re-opens submission for the same questions
//! without touching previously recorded responses.

use crate::application::config::PollConfig;
use crate::application::get_state::load_or_init;
use crate::domain::entities::ClassState;
use crate::domain::repository::ClassStateRepository;
use crate::error::PollResult;
use kernel::label::SessionId;
use std::sync::Arc;

/// Start Session Use Case
pub struct StartSessionUseCase<R>
where
    R: ClassStateRepository,
{
    repo: Arc<R>,
    config: Arc<PollConfig>,
}

impl<R> StartSessionUseCase<R>
where
    R: ClassStateRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<PollConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, session: String) -> PollResult<ClassState> {
        let session = SessionId::new(&session)?;

        let mut state = load_or_init(self.repo.as_ref(), &self.config).await?;
        state.start_session(session);
        self.repo.save(&state).await?;

        tracing::info!(session = %state.session_id, "New session started");

        Ok(state)
    }
}
