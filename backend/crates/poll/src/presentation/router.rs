//! Poll Router

use crate::application::config::PollConfig;
use crate::domain::repository::{ClassStateRepository, QuestionBankRepository, ResponseRepository};
use crate::infra::postgres::PgPollRepository;
use crate::infra::question_files::FsQuestionBanks;
use crate::presentation::handlers::{self, PollAppState};
use crate::presentation::middleware::{InstructorGuardState, require_instructor_key};
use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    routing::{get, post},
};
use std::sync::Arc;

/// Create the poll router with the PostgreSQL repository and file banks
pub fn poll_router(repo: PgPollRepository, banks: FsQuestionBanks, config: PollConfig) -> Router {
    poll_router_generic(repo, banks, config)
}

/// Create a generic poll router for any repository implementation
pub fn poll_router_generic<R, B>(repo: R, banks: B, config: PollConfig) -> Router
where
    R: ResponseRepository + ClassStateRepository + Clone + Send + Sync + 'static,
    B: QuestionBankRepository + Clone + Send + Sync + 'static,
{
    let state = PollAppState {
        repo: Arc::new(repo),
        banks: Arc::new(banks),
        config: Arc::new(config),
    };

    let guard = InstructorGuardState {
        config: state.config.clone(),
    };

    let instructor = Router::new()
        .route("/lectures", get(handlers::list_lectures::<R, B>))
        .route("/lecture", post(handlers::set_lecture::<R, B>))
        .route("/live", post(handlers::set_live_question::<R, B>))
        .route("/session", post(handlers::start_session::<R, B>))
        .route("/results", get(handlers::instructor_results::<R, B>))
        .route("/export", get(handlers::export_lecture::<R, B>))
        .layer(middleware::from_fn(move |req: Request, next: Next| {
            let guard = guard.clone();
            async move { require_instructor_key(guard, req, next).await }
        }));

    Router::new()
        .route("/state", get(handlers::get_state::<R, B>))
        .route("/submit", post(handlers::submit_response::<R, B>))
        .route("/results", get(handlers::results::<R, B>))
        .nest("/instructor", instructor)
        .with_state(state)
}
