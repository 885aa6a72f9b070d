//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::get_state::StateOutput;
use crate::application::tally_results::ResultsOutput;
use crate::domain::entities::ClassState;
use crate::domain::question::{Question, QuestionKind};
use crate::domain::services::Tally;
use crate::domain::value_objects::Answer;

/// Request for POST /api/poll/submit
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub netid: String,
    pub question_id: String,
    pub answer: Answer,
}

/// Response for POST /api/poll/submit
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseBody {
    pub written: bool,
}

/// One input field of a multi-field question, as rendered to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub key: String,
    pub label: String,
}

/// Client-facing projection of a question, shaped by its type tag
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub question_id: String,
    #[serde(rename = "type")]
    pub question_type: &'static str,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_selections: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldView>>,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        let mut view = Self {
            question_id: question.question_id.to_string(),
            question_type: question.kind.type_name(),
            prompt: question.prompt.clone(),
            options: None,
            min_selections: None,
            max_selections: None,
            fields: None,
        };

        match &question.kind {
            QuestionKind::Text => {}
            QuestionKind::SingleChoice { options } => {
                view.options = Some(options.clone());
            }
            QuestionKind::MultiChoice {
                options,
                min_selections,
                max_selections,
            } => {
                view.options = Some(options.clone());
                view.min_selections = Some(*min_selections);
                view.max_selections = Some(max_selections.unwrap_or(options.len()));
            }
            QuestionKind::MultiField { fields, .. } => {
                view.fields = Some(
                    fields
                        .iter()
                        .map(|f| FieldView {
                            key: f.key.clone(),
                            label: f.label.clone(),
                        })
                        .collect(),
                );
            }
        }

        view
    }
}

/// Response for GET /api/poll/state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    pub course: String,
    pub lecture: String,
    pub session_id: String,
    pub active_question: Option<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub already_submitted: Option<bool>,
}

impl From<StateOutput> for StateResponse {
    fn from(output: StateOutput) -> Self {
        Self {
            course: output.state.course.to_string(),
            lecture: output.state.current_lecture.to_string(),
            session_id: output.state.session_id.to_string(),
            active_question: output.live_question.as_ref().map(QuestionView::from),
            already_submitted: output.already_submitted,
        }
    }
}

/// Response for the instructor state-mutating endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassStateView {
    pub course: String,
    pub lecture: String,
    pub session_id: String,
    pub active_question_id: Option<String>,
}

impl From<&ClassState> for ClassStateView {
    fn from(state: &ClassState) -> Self {
        Self {
            course: state.course.to_string(),
            lecture: state.current_lecture.to_string(),
            session_id: state.session_id.to_string(),
            active_question_id: state.active_question_id.as_ref().map(|q| q.to_string()),
        }
    }
}

/// One bar of the results chart
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionCountView {
    pub option: String,
    pub count: u64,
}

/// One raw response in the instructor detail view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestResponseView {
    pub netid: String,
    pub response: String,
    pub submitted_at: String,
}

/// Response for GET /api/poll/results and /api/poll/instructor/results
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsResponse {
    pub question: QuestionView,
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<Vec<OptionCountView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<Vec<LatestResponseView>>,
}

impl From<ResultsOutput> for ResultsResponse {
    fn from(output: ResultsOutput) -> Self {
        let counts = match &output.tally {
            Tally::Options(counts) => Some(
                counts
                    .iter()
                    .map(|c| OptionCountView {
                        option: c.option.clone(),
                        count: c.count,
                    })
                    .collect(),
            ),
            Tally::Freeform { .. } => None,
        };

        let latest = output.latest.as_ref().map(|rows| {
            rows.iter()
                .map(|r| LatestResponseView {
                    netid: r.key.netid.to_string(),
                    response: r.answer.to_csv_field(),
                    submitted_at: r.timestamp_rfc3339(),
                })
                .collect()
        });

        Self {
            question: QuestionView::from(&output.question),
            total: output.total,
            counts,
            latest,
        }
    }
}

/// Request for POST /api/poll/instructor/lecture
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLectureRequest {
    pub lecture: String,
}

/// Request for POST /api/poll/instructor/live
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLiveQuestionRequest {
    pub question_id: String,
}

/// Request for POST /api/poll/instructor/session
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub session_id: String,
}

/// Response for GET /api/poll/instructor/lectures
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LecturesResponse {
    pub lectures: Vec<String>,
}

/// Query for GET /api/poll/state
#[derive(Debug, Clone, Deserialize)]
pub struct StateQuery {
    pub netid: Option<String>,
}

/// Query for the results endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsQuery {
    pub question_id: Option<String>,
}

/// Query for GET /api/poll/instructor/export
#[derive(Debug, Clone, Deserialize)]
pub struct ExportQuery {
    pub lecture: Option<String>,
}
