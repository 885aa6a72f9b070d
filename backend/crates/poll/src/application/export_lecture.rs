//! Export Lecture Use Case
//!
//! Flattens every response of a lecture (all sessions, submission order)
//! into CSV with a fixed column order. Array and map answers are serialized
//! as JSON text in the flat format.

use crate::application::config::PollConfig;
use crate::application::get_state::load_or_init;
use crate::domain::repository::{ClassStateRepository, ResponseRepository};
use crate::error::{PollError, PollResult};
use kernel::label::LectureId;
use std::sync::Arc;

/// Fixed CSV column order of the export
pub const EXPORT_COLUMNS: [&str; 9] = [
    "timestamp",
    "course",
    "lecture",
    "session_id",
    "netid",
    "question_id",
    "question_type",
    "question_prompt",
    "response",
];

/// Output DTO for export lecture
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub body: String,
}

/// Export Lecture Use Case
pub struct ExportLectureUseCase<R>
where
    R: ResponseRepository + ClassStateRepository,
{
    repo: Arc<R>,
    config: Arc<PollConfig>,
}

impl<R> ExportLectureUseCase<R>
where
    R: ResponseRepository + ClassStateRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<PollConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, lecture: Option<String>) -> PollResult<CsvExport> {
        let lecture = match lecture {
            Some(raw) => LectureId::new(&raw)?,
            None => {
                load_or_init(self.repo.as_ref(), &self.config)
                    .await?
                    .current_lecture
            }
        };

        let rows = self
            .repo
            .list_for_lecture(&self.config.course, &lecture)
            .await?;

        if rows.is_empty() {
            return Err(PollError::NoResponses(lecture.to_string()));
        }

        let mut body = String::new();
        platform::csv::write_record(&mut body, &EXPORT_COLUMNS);
        for row in &rows {
            let timestamp = row.timestamp_rfc3339();
            let response = row.answer.to_csv_field();
            platform::csv::write_record(
                &mut body,
                &[
                    timestamp.as_str(),
                    row.key.course.as_str(),
                    row.key.lecture.as_str(),
                    row.key.session.as_str(),
                    row.key.netid.as_str(),
                    row.key.question.as_str(),
                    row.question_type.as_str(),
                    row.question_prompt.as_str(),
                    response.as_str(),
                ],
            );
        }

        tracing::info!(lecture = %lecture, rows = rows.len(), "Exported responses");

        Ok(CsvExport {
            filename: format!("responses_{}.csv", lecture),
            body,
        })
    }
}
