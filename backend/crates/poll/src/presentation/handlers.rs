//! HTTP Handlers

use crate::application::config::PollConfig;
use crate::application::export_lecture::ExportLectureUseCase;
use crate::application::get_state::GetClassStateUseCase;
use crate::application::set_lecture::SetLectureUseCase;
use crate::application::set_live_question::SetLiveQuestionUseCase;
use crate::application::start_session::StartSessionUseCase;
use crate::application::submit_response::{SubmitResponseInput, SubmitResponseUseCase};
use crate::application::tally_results::TallyResultsUseCase;
use crate::domain::repository::{ClassStateRepository, QuestionBankRepository, ResponseRepository};
use crate::error::PollResult;
use crate::presentation::dto::{
    ClassStateView, ExportQuery, LecturesResponse, ResultsQuery, ResultsResponse,
    SetLectureRequest, SetLiveQuestionRequest, StartSessionRequest, StateQuery, StateResponse,
    SubmitRequest, SubmitResponseBody,
};
use axum::Json;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use std::sync::Arc;

/// Shared state for poll handlers
#[derive(Clone)]
pub struct PollAppState<R, B>
where
    R: ResponseRepository + ClassStateRepository + Clone + Send + Sync + 'static,
    B: QuestionBankRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub banks: Arc<B>,
    pub config: Arc<PollConfig>,
}

/// GET /api/poll/state
pub async fn get_state<R, B>(
    State(state): State<PollAppState<R, B>>,
    Query(query): Query<StateQuery>,
) -> PollResult<Json<StateResponse>>
where
    R: ResponseRepository + ClassStateRepository + Clone + Send + Sync + 'static,
    B: QuestionBankRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        GetClassStateUseCase::new(state.repo.clone(), state.banks.clone(), state.config.clone());

    let output = use_case.execute(query.netid).await?;

    Ok(Json(StateResponse::from(output)))
}

/// POST /api/poll/submit
pub async fn submit_response<R, B>(
    State(state): State<PollAppState<R, B>>,
    Json(req): Json<SubmitRequest>,
) -> PollResult<Json<SubmitResponseBody>>
where
    R: ResponseRepository + ClassStateRepository + Clone + Send + Sync + 'static,
    B: QuestionBankRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        SubmitResponseUseCase::new(state.repo.clone(), state.banks.clone(), state.config.clone());

    let input = SubmitResponseInput {
        netid: req.netid,
        question_id: req.question_id,
        answer: req.answer,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(SubmitResponseBody {
        written: output.written,
    }))
}

/// GET /api/poll/results
///
/// Projector / results mode: counts and totals only, no student identifiers.
pub async fn results<R, B>(
    State(state): State<PollAppState<R, B>>,
    Query(query): Query<ResultsQuery>,
) -> PollResult<Json<ResultsResponse>>
where
    R: ResponseRepository + ClassStateRepository + Clone + Send + Sync + 'static,
    B: QuestionBankRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        TallyResultsUseCase::new(state.repo.clone(), state.banks.clone(), state.config.clone());

    let output = use_case.execute(query.question_id, false).await?;

    Ok(Json(ResultsResponse::from(output)))
}

/// GET /api/poll/instructor/results
pub async fn instructor_results<R, B>(
    State(state): State<PollAppState<R, B>>,
    Query(query): Query<ResultsQuery>,
) -> PollResult<Json<ResultsResponse>>
where
    R: ResponseRepository + ClassStateRepository + Clone + Send + Sync + 'static,
    B: QuestionBankRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        TallyResultsUseCase::new(state.repo.clone(), state.banks.clone(), state.config.clone());

    let output = use_case.execute(query.question_id, true).await?;

    Ok(Json(ResultsResponse::from(output)))
}

/// GET /api/poll/instructor/lectures
pub async fn list_lectures<R, B>(
    State(state): State<PollAppState<R, B>>,
) -> PollResult<Json<LecturesResponse>>
where
    R: ResponseRepository + ClassStateRepository + Clone + Send + Sync + 'static,
    B: QuestionBankRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        SetLectureUseCase::new(state.repo.clone(), state.banks.clone(), state.config.clone());

    let lectures = use_case.available().await?;

    Ok(Json(LecturesResponse {
        lectures: lectures.iter().map(|l| l.to_string()).collect(),
    }))
}

/// POST /api/poll/instructor/lecture
pub async fn set_lecture<R, B>(
    State(state): State<PollAppState<R, B>>,
    Json(req): Json<SetLectureRequest>,
) -> PollResult<Json<ClassStateView>>
where
    R: ResponseRepository + ClassStateRepository + Clone + Send + Sync + 'static,
    B: QuestionBankRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        SetLectureUseCase::new(state.repo.clone(), state.banks.clone(), state.config.clone());

    let updated = use_case.execute(req.lecture).await?;

    Ok(Json(ClassStateView::from(&updated)))
}

/// POST /api/poll/instructor/live
pub async fn set_live_question<R, B>(
    State(state): State<PollAppState<R, B>>,
    Json(req): Json<SetLiveQuestionRequest>,
) -> PollResult<Json<ClassStateView>>
where
    R: ResponseRepository + ClassStateRepository + Clone + Send + Sync + 'static,
    B: QuestionBankRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        SetLiveQuestionUseCase::new(state.repo.clone(), state.banks.clone(), state.config.clone());

    let updated = use_case.execute(req.question_id).await?;

    Ok(Json(ClassStateView::from(&updated)))
}

/// POST /api/poll/instructor/session
pub async fn start_session<R, B>(
    State(state): State<PollAppState<R, B>>,
    Json(req): Json<StartSessionRequest>,
) -> PollResult<Json<ClassStateView>>
where
    R: ResponseRepository + ClassStateRepository + Clone + Send + Sync + 'static,
    B: QuestionBankRepository + Clone + Send + Sync + 'static,
{
    let use_case = StartSessionUseCase::new(state.repo.clone(), state.config.clone());

    let updated = use_case.execute(req.session_id).await?;

    Ok(Json(ClassStateView::from(&updated)))
}

/// GET /api/poll/instructor/export
pub async fn export_lecture<R, B>(
    State(state): State<PollAppState<R, B>>,
    Query(query): Query<ExportQuery>,
) -> PollResult<impl IntoResponse>
where
    R: ResponseRepository + ClassStateRepository + Clone + Send + Sync + 'static,
    B: QuestionBankRepository + Clone + Send + Sync + 'static,
{
    let use_case = ExportLectureUseCase::new(state.repo.clone(), state.config.clone());

    let export = use_case.execute(query.lecture).await?;

    let headers = [
        (
            header::CONTENT_TYPE,
            "text/csv; charset=utf-8".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.filename),
        ),
    ];

    Ok((headers, export.body))
}
