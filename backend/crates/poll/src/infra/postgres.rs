//! PostgreSQL Repository Implementations

use crate::domain::entities::{ClassState, Response};
use crate::domain::repository::{ClassStateRepository, ResponseRepository};
use crate::domain::value_objects::ResponseKey;
use crate::error::{PollError, PollResult};
use kernel::label::{CourseId, LectureId, NetId, QuestionId, SessionId};
use sqlx::PgPool;

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgPollRepository {
    pool: PgPool,
}

impl PgPollRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ResponseRepository for PgPollRepository {
    async fn insert_if_absent(&self, response: &Response) -> PollResult<bool> {
        let answer_json = serde_json::to_string(&response.answer)
            .map_err(|e| PollError::Internal(format!("serialize answer: {e}")))?;

        // The conditional-create: the primary key on response_key makes the
        // insert succeed at most once per identity key, atomically. A
        // conflicting insert affects zero rows and leaves the stored row
        // untouched.
        let result = sqlx::query(
            r#"
            INSERT INTO poll_responses (
                response_key,
                course,
                lecture,
                session_id,
                netid,
                question_id,
                question_type,
                question_prompt,
                answer_json,
                submitted_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (response_key) DO NOTHING
            "#,
        )
        .bind(response.key.storage_key())
        .bind(response.key.course.as_str())
        .bind(response.key.lecture.as_str())
        .bind(response.key.session.as_str())
        .bind(response.key.netid.as_str())
        .bind(response.key.question.as_str())
        .bind(&response.question_type)
        .bind(&response.question_prompt)
        .bind(&answer_json)
        .bind(response.submitted_at)
        .execute(&self.pool)
        .await?;

        let written = result.rows_affected() == 1;

        if written {
            tracing::info!(key = %response.key, "Response created");
        } else {
            tracing::debug!(key = %response.key, "Response already exists");
        }

        Ok(written)
    }

    async fn exists(&self, key: &ResponseKey) -> PollResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM poll_responses WHERE response_key = $1)",
        )
        .bind(key.storage_key())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find(&self, key: &ResponseKey) -> PollResult<Option<Response>> {
        let row = sqlx::query_as::<_, ResponseRow>(
            r#"
            SELECT
                course,
                lecture,
                session_id,
                netid,
                question_id,
                question_type,
                question_prompt,
                answer_json,
                submitted_at
            FROM poll_responses
            WHERE response_key = $1
            "#,
        )
        .bind(key.storage_key())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_response()).transpose()
    }

    async fn list_for_question(
        &self,
        course: &CourseId,
        lecture: &LectureId,
        session: &SessionId,
        question: &QuestionId,
    ) -> PollResult<Vec<Response>> {
        let rows = sqlx::query_as::<_, ResponseRow>(
            r#"
            SELECT
                course,
                lecture,
                session_id,
                netid,
                question_id,
                question_type,
                question_prompt,
                answer_json,
                submitted_at
            FROM poll_responses
            WHERE course = $1 AND lecture = $2 AND session_id = $3 AND question_id = $4
            ORDER BY submitted_at
            "#,
        )
        .bind(course.as_str())
        .bind(lecture.as_str())
        .bind(session.as_str())
        .bind(question.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_response()).collect()
    }

    async fn list_for_lecture(
        &self,
        course: &CourseId,
        lecture: &LectureId,
    ) -> PollResult<Vec<Response>> {
        let rows = sqlx::query_as::<_, ResponseRow>(
            r#"
            SELECT
                course,
                lecture,
                session_id,
                netid,
                question_id,
                question_type,
                question_prompt,
                answer_json,
                submitted_at
            FROM poll_responses
            WHERE course = $1 AND lecture = $2
            ORDER BY submitted_at
            "#,
        )
        .bind(course.as_str())
        .bind(lecture.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_response()).collect()
    }
}

impl ClassStateRepository for PgPollRepository {
    async fn load(&self, course: &CourseId) -> PollResult<Option<ClassState>> {
        let row = sqlx::query_as::<_, ClassStateRow>(
            r#"
            SELECT
                course,
                current_lecture,
                session_id,
                active_question_id
            FROM class_state
            WHERE course = $1
            "#,
        )
        .bind(course.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_class_state()))
    }

    async fn save(&self, state: &ClassState) -> PollResult<()> {
        sqlx::query(
            r#"
            INSERT INTO class_state (course, current_lecture, session_id, active_question_id, updated_at)
            VALUES ($1, $2, $3, $4, now())
            ON CONFLICT (course) DO UPDATE SET
                current_lecture = EXCLUDED.current_lecture,
                session_id = EXCLUDED.session_id,
                active_question_id = EXCLUDED.active_question_id,
                updated_at = now()
            "#,
        )
        .bind(state.course.as_str())
        .bind(state.current_lecture.as_str())
        .bind(state.session_id.as_str())
        .bind(state.active_question_id.as_ref().map(|q| q.as_str()))
        .execute(&self.pool)
        .await?;

        tracing::debug!(course = %state.course, "Class state saved");

        Ok(())
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct ResponseRow {
    course: String,
    lecture: String,
    session_id: String,
    netid: String,
    question_id: String,
    question_type: String,
    question_prompt: String,
    answer_json: String,
    submitted_at: chrono::DateTime<chrono::Utc>,
}

impl ResponseRow {
    fn into_response(self) -> PollResult<Response> {
        let answer = serde_json::from_str(&self.answer_json)
            .map_err(|e| PollError::Internal(format!("stored answer is malformed: {e}")))?;

        Ok(Response {
            key: ResponseKey::new(
                CourseId::from_db(self.course),
                LectureId::from_db(self.lecture),
                SessionId::from_db(self.session_id),
                QuestionId::from_db(self.question_id),
                NetId::from_db(self.netid),
            ),
            question_type: self.question_type,
            question_prompt: self.question_prompt,
            answer,
            submitted_at: self.submitted_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ClassStateRow {
    course: String,
    current_lecture: String,
    session_id: String,
    active_question_id: Option<String>,
}

impl ClassStateRow {
    fn into_class_state(self) -> ClassState {
        ClassState {
            course: CourseId::from_db(self.course),
            current_lecture: LectureId::from_db(self.current_lecture),
            session_id: SessionId::from_db(self.session_id),
            active_question_id: self.active_question_id.map(QuestionId::from_db),
        }
    }
}
