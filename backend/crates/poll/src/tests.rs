//! Unit tests for the poll crate
//!
//! The submission guard properties run against an in-memory repository
//! double behind the same traits the PostgreSQL implementation fulfills.

#[cfg(test)]
mod support {
    use crate::domain::entities::{ClassState, Response};
    use crate::domain::question::{FieldSpec, Question, QuestionBank, QuestionKind, Requirement};
    use crate::domain::repository::{
        ClassStateRepository, QuestionBankRepository, ResponseRepository,
    };
    use crate::domain::value_objects::ResponseKey;
    use crate::error::{PollError, PollResult};
    use kernel::label::{CourseId, LectureId, QuestionId, SessionId};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// In-memory store double. A single mutex makes the check-then-create
    /// in `insert_if_absent` atomic, the same contract the database's
    /// conditional insert provides.
    #[derive(Clone, Default)]
    pub struct MemPoll {
        responses: Arc<Mutex<HashMap<String, Response>>>,
        state: Arc<Mutex<Option<ClassState>>>,
    }

    impl ResponseRepository for MemPoll {
        async fn insert_if_absent(&self, response: &Response) -> PollResult<bool> {
            let mut responses = self.responses.lock().expect("lock poisoned");
            let key = response.key.storage_key();
            if responses.contains_key(&key) {
                return Ok(false);
            }
            responses.insert(key, response.clone());
            Ok(true)
        }

        async fn exists(&self, key: &ResponseKey) -> PollResult<bool> {
            let responses = self.responses.lock().expect("lock poisoned");
            Ok(responses.contains_key(&key.storage_key()))
        }

        async fn find(&self, key: &ResponseKey) -> PollResult<Option<Response>> {
            let responses = self.responses.lock().expect("lock poisoned");
            Ok(responses.get(&key.storage_key()).cloned())
        }

        async fn list_for_question(
            &self,
            course: &CourseId,
            lecture: &LectureId,
            session: &SessionId,
            question: &QuestionId,
        ) -> PollResult<Vec<Response>> {
            let responses = self.responses.lock().expect("lock poisoned");
            let mut rows: Vec<Response> = responses
                .values()
                .filter(|r| {
                    &r.key.course == course
                        && &r.key.lecture == lecture
                        && &r.key.session == session
                        && &r.key.question == question
                })
                .cloned()
                .collect();
            rows.sort_by_key(|r| (r.submitted_at, r.key.storage_key()));
            Ok(rows)
        }

        async fn list_for_lecture(
            &self,
            course: &CourseId,
            lecture: &LectureId,
        ) -> PollResult<Vec<Response>> {
            let responses = self.responses.lock().expect("lock poisoned");
            let mut rows: Vec<Response> = responses
                .values()
                .filter(|r| &r.key.course == course && &r.key.lecture == lecture)
                .cloned()
                .collect();
            rows.sort_by_key(|r| (r.submitted_at, r.key.storage_key()));
            Ok(rows)
        }
    }

    impl ClassStateRepository for MemPoll {
        async fn load(&self, course: &CourseId) -> PollResult<Option<ClassState>> {
            let state = self.state.lock().expect("lock poisoned");
            Ok(state.clone().filter(|s| &s.course == course))
        }

        async fn save(&self, new_state: &ClassState) -> PollResult<()> {
            let mut state = self.state.lock().expect("lock poisoned");
            *state = Some(new_state.clone());
            Ok(())
        }
    }

    /// Bank double serving fixed in-memory banks
    #[derive(Clone, Default)]
    pub struct MemBanks {
        banks: HashMap<String, QuestionBank>,
    }

    impl MemBanks {
        pub fn with(mut self, bank: QuestionBank) -> Self {
            self.banks.insert(bank.lecture.to_string(), bank);
            self
        }
    }

    impl QuestionBankRepository for MemBanks {
        async fn available(&self) -> PollResult<Vec<LectureId>> {
            let mut lectures: Vec<LectureId> = self
                .banks
                .keys()
                .map(|l| LectureId::from_db(l.clone()))
                .collect();
            lectures.sort_by(|a, b| a.as_str().cmp(b.as_str()));
            Ok(lectures)
        }

        async fn load(&self, lecture: &LectureId) -> PollResult<QuestionBank> {
            self.banks
                .get(lecture.as_str())
                .cloned()
                .ok_or_else(|| PollError::LectureNotFound(lecture.to_string()))
        }
    }

    pub fn agree_question(id: &str) -> Question {
        Question {
            question_id: QuestionId::new(id).unwrap(),
            prompt: "The market is efficient".to_string(),
            kind: QuestionKind::SingleChoice {
                options: vec![
                    "Strongly Agree".to_string(),
                    "Agree".to_string(),
                    "Disagree".to_string(),
                ],
            },
        }
    }

    pub fn lecture_bank(lecture: &str) -> QuestionBank {
        QuestionBank {
            course: CourseId::new("GBA468").unwrap(),
            lecture: LectureId::new(lecture).unwrap(),
            title: "Warm-up".to_string(),
            questions: vec![
                agree_question("q1"),
                Question {
                    question_id: QuestionId::new("q2").unwrap(),
                    prompt: "Why?".to_string(),
                    kind: QuestionKind::Text,
                },
                Question {
                    question_id: QuestionId::new("q3").unwrap(),
                    prompt: "Trade-offs".to_string(),
                    kind: QuestionKind::MultiField {
                        fields: vec![
                            FieldSpec {
                                key: "pro".to_string(),
                                label: "One pro".to_string(),
                            },
                            FieldSpec {
                                key: "con".to_string(),
                                label: "One con".to_string(),
                            },
                        ],
                        require: Requirement::All,
                    },
                },
            ],
        }
    }

    pub fn key(session: &str, question: &str, netid: &str) -> ResponseKey {
        ResponseKey::new(
            CourseId::new("GBA468").unwrap(),
            LectureId::new("lecture_01").unwrap(),
            SessionId::new(session).unwrap(),
            QuestionId::new(question).unwrap(),
            kernel::label::NetId::new(netid).unwrap(),
        )
    }
}

#[cfg(test)]
mod submission_guard_tests {
    use super::support::{MemPoll, agree_question, key};
    use crate::domain::entities::Response;
    use crate::domain::repository::ResponseRepository;
    use crate::domain::value_objects::Answer;

    #[tokio::test]
    async fn test_second_write_under_same_key_is_a_noop() {
        let repo = MemPoll::default();
        let question = agree_question("q1");
        let k = key("2025-01-10", "q1", "abc123");

        let first = Response::new(k.clone(), &question, Answer::Text("Strongly Agree".into()));
        let second = Response::new(k.clone(), &question, Answer::Text("Disagree".into()));

        assert!(repo.insert_if_absent(&first).await.unwrap());
        assert!(!repo.insert_if_absent(&second).await.unwrap());

        // The stored record still carries the first answer.
        let stored = repo.find(&k).await.unwrap().unwrap();
        assert_eq!(stored.answer, Answer::Text("Strongly Agree".into()));
    }

    #[tokio::test]
    async fn test_exists_flips_only_on_successful_write() {
        let repo = MemPoll::default();
        let question = agree_question("q1");
        let k = key("2025-01-10", "q1", "abc123");

        assert!(!repo.exists(&k).await.unwrap());

        let response = Response::new(k.clone(), &question, Answer::Text("Agree".into()));
        assert!(repo.insert_if_absent(&response).await.unwrap());

        assert!(repo.exists(&k).await.unwrap());
    }

    #[tokio::test]
    async fn test_racing_writers_one_winner() {
        let repo = MemPoll::default();
        let question = agree_question("q1");
        let k = key("2025-01-10", "q1", "abc123");

        let a = Response::new(k.clone(), &question, Answer::Text("Agree".into()));
        let b = Response::new(k.clone(), &question, Answer::Text("Disagree".into()));

        let repo_a = repo.clone();
        let repo_b = repo.clone();
        let task_a = tokio::spawn(async move { repo_a.insert_if_absent(&a).await.unwrap() });
        let task_b = tokio::spawn(async move { repo_b.insert_if_absent(&b).await.unwrap() });

        let wrote_a = task_a.await.unwrap();
        let wrote_b = task_b.await.unwrap();

        assert!(wrote_a ^ wrote_b, "exactly one writer must win the key");
        assert!(repo.exists(&k).await.unwrap());
    }

    #[tokio::test]
    async fn test_distinct_students_write_independently() {
        let repo = MemPoll::default();
        let question = agree_question("q1");

        let a = Response::new(
            key("2025-01-10", "q1", "abc123"),
            &question,
            Answer::Text("Agree".into()),
        );
        let b = Response::new(
            key("2025-01-10", "q1", "xyz789"),
            &question,
            Answer::Text("Agree".into()),
        );

        assert!(repo.insert_if_absent(&a).await.unwrap());
        assert!(repo.insert_if_absent(&b).await.unwrap());
    }

    #[tokio::test]
    async fn test_new_session_reopens_the_key() {
        let repo = MemPoll::default();
        let question = agree_question("q1");

        let first = Response::new(
            key("2025-01-10", "q1", "abc123"),
            &question,
            Answer::Text("Agree".into()),
        );
        let next_session = Response::new(
            key("2025-01-17", "q1", "abc123"),
            &question,
            Answer::Text("Disagree".into()),
        );

        assert!(repo.insert_if_absent(&first).await.unwrap());
        assert!(repo.insert_if_absent(&next_session).await.unwrap());
    }
}

#[cfg(test)]
mod submit_use_case_tests {
    use super::support::{MemBanks, MemPoll, key, lecture_bank};
    use crate::application::config::PollConfig;
    use crate::application::set_live_question::SetLiveQuestionUseCase;
    use crate::application::submit_response::{SubmitResponseInput, SubmitResponseUseCase};
    use crate::domain::repository::ResponseRepository;
    use crate::domain::value_objects::Answer;
    use crate::error::PollError;
    use std::sync::Arc;

    fn config() -> Arc<PollConfig> {
        Arc::new(PollConfig {
            default_session: kernel::label::SessionId::from_db("2025-01-10"),
            ..PollConfig::default()
        })
    }

    async fn live_fixture() -> (Arc<MemPoll>, Arc<MemBanks>, Arc<PollConfig>) {
        let repo = Arc::new(MemPoll::default());
        let banks = Arc::new(MemBanks::default().with(lecture_bank("lecture_01")));
        let config = config();

        SetLiveQuestionUseCase::new(repo.clone(), banks.clone(), config.clone())
            .execute("q1".to_string())
            .await
            .unwrap();

        (repo, banks, config)
    }

    fn submit(netid: &str, question_id: &str, answer: Answer) -> SubmitResponseInput {
        SubmitResponseInput {
            netid: netid.to_string(),
            question_id: question_id.to_string(),
            answer,
        }
    }

    #[tokio::test]
    async fn test_first_submission_is_written() {
        let (repo, banks, config) = live_fixture().await;
        let use_case = SubmitResponseUseCase::new(repo, banks, config);

        let output = use_case
            .execute(submit("abc123", "q1", Answer::Text("Strongly Agree".into())))
            .await
            .unwrap();

        assert!(output.written);
    }

    #[tokio::test]
    async fn test_retry_is_idempotent_and_keeps_first_answer() {
        let (repo, banks, config) = live_fixture().await;
        let use_case = SubmitResponseUseCase::new(repo.clone(), banks, config);

        let first = use_case
            .execute(submit("abc123", "q1", Answer::Text("Strongly Agree".into())))
            .await
            .unwrap();
        let second = use_case
            .execute(submit("abc123", "q1", Answer::Text("Disagree".into())))
            .await
            .unwrap();

        assert!(first.written);
        assert!(!second.written);

        let stored = repo
            .find(&key("2025-01-10", "q1", "abc123"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.answer, Answer::Text("Strongly Agree".into()));
    }

    #[tokio::test]
    async fn test_netid_case_folds_into_the_same_key() {
        let (repo, banks, config) = live_fixture().await;
        let use_case = SubmitResponseUseCase::new(repo, banks, config);

        let first = use_case
            .execute(submit("ABC123", "q1", Answer::Text("Agree".into())))
            .await
            .unwrap();
        let second = use_case
            .execute(submit("abc123", "q1", Answer::Text("Agree".into())))
            .await
            .unwrap();

        assert!(first.written);
        assert!(!second.written);
    }

    #[tokio::test]
    async fn test_only_the_live_question_accepts_submissions() {
        let (repo, banks, config) = live_fixture().await;
        let use_case = SubmitResponseUseCase::new(repo, banks, config);

        let err = use_case
            .execute(submit("abc123", "q2", Answer::Text("because".into())))
            .await
            .unwrap_err();

        assert!(matches!(err, PollError::QuestionNotLive(_)));
    }

    #[tokio::test]
    async fn test_no_live_question_rejects() {
        let repo = Arc::new(MemPoll::default());
        let banks = Arc::new(MemBanks::default().with(lecture_bank("lecture_01")));
        let use_case = SubmitResponseUseCase::new(repo, banks, config());

        let err = use_case
            .execute(submit("abc123", "q1", Answer::Text("Agree".into())))
            .await
            .unwrap_err();

        assert!(matches!(err, PollError::NoLiveQuestion));
    }

    #[tokio::test]
    async fn test_invalid_answer_never_reaches_the_store() {
        let (repo, banks, config) = live_fixture().await;
        let use_case = SubmitResponseUseCase::new(repo.clone(), banks, config);

        let err = use_case
            .execute(submit("abc123", "q1", Answer::Text("Maybe".into())))
            .await
            .unwrap_err();

        assert!(matches!(err, PollError::Incomplete(_)));
        assert!(
            !repo
                .exists(&key("2025-01-10", "q1", "abc123"))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_blank_netid_rejected() {
        let (repo, banks, config) = live_fixture().await;
        let use_case = SubmitResponseUseCase::new(repo, banks, config);

        let err = use_case
            .execute(submit("   ", "q1", Answer::Text("Agree".into())))
            .await
            .unwrap_err();

        assert!(matches!(err, PollError::InvalidLabel(_)));
    }
}

#[cfg(test)]
mod state_and_results_tests {
    use super::support::{MemBanks, MemPoll, lecture_bank};
    use crate::application::config::PollConfig;
    use crate::application::get_state::GetClassStateUseCase;
    use crate::application::set_live_question::SetLiveQuestionUseCase;
    use crate::application::start_session::StartSessionUseCase;
    use crate::application::submit_response::{SubmitResponseInput, SubmitResponseUseCase};
    use crate::application::tally_results::TallyResultsUseCase;
    use crate::domain::repository::ClassStateRepository;
    use crate::domain::services::Tally;
    use crate::domain::value_objects::Answer;
    use std::sync::Arc;

    fn fixture() -> (Arc<MemPoll>, Arc<MemBanks>, Arc<PollConfig>) {
        (
            Arc::new(MemPoll::default()),
            Arc::new(MemBanks::default().with(lecture_bank("lecture_01"))),
            Arc::new(PollConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_first_access_bootstraps_state() {
        let (repo, banks, config) = fixture();
        let use_case = GetClassStateUseCase::new(repo.clone(), banks, config.clone());

        let output = use_case.execute(None).await.unwrap();

        assert_eq!(output.state.current_lecture, config.default_lecture);
        assert_eq!(output.state.session_id, config.default_session);
        assert!(output.live_question.is_none());
        assert!(output.already_submitted.is_none());

        // Bootstrapped state is persisted, not recomputed per request.
        assert!(repo.load(&config.course).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_state_reports_submission_status_for_netid() {
        let (repo, banks, config) = fixture();
        SetLiveQuestionUseCase::new(repo.clone(), banks.clone(), config.clone())
            .execute("q1".to_string())
            .await
            .unwrap();

        let get_state = GetClassStateUseCase::new(repo.clone(), banks.clone(), config.clone());
        let before = get_state.execute(Some("abc123".to_string())).await.unwrap();
        assert_eq!(before.already_submitted, Some(false));

        SubmitResponseUseCase::new(repo.clone(), banks, config)
            .execute(SubmitResponseInput {
                netid: "abc123".to_string(),
                question_id: "q1".to_string(),
                answer: Answer::Text("Agree".to_string()),
            })
            .await
            .unwrap();

        let after = get_state.execute(Some("abc123".to_string())).await.unwrap();
        assert_eq!(after.already_submitted, Some(true));
    }

    #[tokio::test]
    async fn test_two_students_tally_independently() {
        let (repo, banks, config) = fixture();
        SetLiveQuestionUseCase::new(repo.clone(), banks.clone(), config.clone())
            .execute("q1".to_string())
            .await
            .unwrap();

        let submit = SubmitResponseUseCase::new(repo.clone(), banks.clone(), config.clone());
        for (netid, choice) in [("abc123", "Agree"), ("xyz789", "Disagree")] {
            let output = submit
                .execute(SubmitResponseInput {
                    netid: netid.to_string(),
                    question_id: "q1".to_string(),
                    answer: Answer::Text(choice.to_string()),
                })
                .await
                .unwrap();
            assert!(output.written);
        }

        let results = TallyResultsUseCase::new(repo, banks, config)
            .execute(None, false)
            .await
            .unwrap();

        assert_eq!(results.total, 2);
        let Tally::Options(counts) = results.tally else {
            panic!("expected option counts");
        };
        assert_eq!(counts[0].count, 0); // Strongly Agree
        assert_eq!(counts[1].count, 1); // Agree
        assert_eq!(counts[2].count, 1); // Disagree
    }

    #[tokio::test]
    async fn test_new_session_resets_the_tally_scope() {
        let (repo, banks, config) = fixture();
        SetLiveQuestionUseCase::new(repo.clone(), banks.clone(), config.clone())
            .execute("q1".to_string())
            .await
            .unwrap();

        let submit = SubmitResponseUseCase::new(repo.clone(), banks.clone(), config.clone());
        submit
            .execute(SubmitResponseInput {
                netid: "abc123".to_string(),
                question_id: "q1".to_string(),
                answer: Answer::Text("Agree".to_string()),
            })
            .await
            .unwrap();

        StartSessionUseCase::new(repo.clone(), config.clone())
            .execute("2025-01-17".to_string())
            .await
            .unwrap();

        let results = TallyResultsUseCase::new(repo.clone(), banks.clone(), config.clone())
            .execute(None, false)
            .await
            .unwrap();
        assert_eq!(results.total, 0);

        // The same student may answer again under the new session.
        let output = submit
            .execute(SubmitResponseInput {
                netid: "abc123".to_string(),
                question_id: "q1".to_string(),
                answer: Answer::Text("Disagree".to_string()),
            })
            .await
            .unwrap();
        assert!(output.written);
    }

    #[tokio::test]
    async fn test_instructor_results_carry_the_raw_tail() {
        let (repo, banks, config) = fixture();
        SetLiveQuestionUseCase::new(repo.clone(), banks.clone(), config.clone())
            .execute("q1".to_string())
            .await
            .unwrap();

        SubmitResponseUseCase::new(repo.clone(), banks.clone(), config.clone())
            .execute(SubmitResponseInput {
                netid: "abc123".to_string(),
                question_id: "q1".to_string(),
                answer: Answer::Text("Agree".to_string()),
            })
            .await
            .unwrap();

        let detailed = TallyResultsUseCase::new(repo.clone(), banks.clone(), config.clone())
            .execute(None, true)
            .await
            .unwrap();
        assert_eq!(detailed.latest.as_ref().map(Vec::len), Some(1));

        let public = TallyResultsUseCase::new(repo, banks, config)
            .execute(None, false)
            .await
            .unwrap();
        assert!(public.latest.is_none());
    }
}

#[cfg(test)]
mod export_tests {
    use super::support::{MemBanks, MemPoll, lecture_bank};
    use crate::application::config::PollConfig;
    use crate::application::export_lecture::{EXPORT_COLUMNS, ExportLectureUseCase};
    use crate::application::set_live_question::SetLiveQuestionUseCase;
    use crate::application::submit_response::{SubmitResponseInput, SubmitResponseUseCase};
    use crate::domain::value_objects::Answer;
    use crate::error::PollError;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_empty_lecture_has_nothing_to_export() {
        let repo = Arc::new(MemPoll::default());
        let use_case = ExportLectureUseCase::new(repo, Arc::new(PollConfig::default()));

        let err = use_case
            .execute(Some("lecture_01".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, PollError::NoResponses(_)));
    }

    #[tokio::test]
    async fn test_export_fixed_columns_and_json_flattening() {
        let repo = Arc::new(MemPoll::default());
        let banks = Arc::new(MemBanks::default().with(lecture_bank("lecture_01")));
        let config = Arc::new(PollConfig::default());

        let set_live = SetLiveQuestionUseCase::new(repo.clone(), banks.clone(), config.clone());
        let submit = SubmitResponseUseCase::new(repo.clone(), banks.clone(), config.clone());

        set_live.execute("q1".to_string()).await.unwrap();
        submit
            .execute(SubmitResponseInput {
                netid: "abc123".to_string(),
                question_id: "q1".to_string(),
                answer: Answer::Text("Strongly Agree".to_string()),
            })
            .await
            .unwrap();

        set_live.execute("q3".to_string()).await.unwrap();
        let mut fields = BTreeMap::new();
        fields.insert("pro".to_string(), "fast, cheap".to_string());
        fields.insert("con".to_string(), "fragile".to_string());
        submit
            .execute(SubmitResponseInput {
                netid: "abc123".to_string(),
                question_id: "q3".to_string(),
                answer: Answer::Fields(fields),
            })
            .await
            .unwrap();

        let export = ExportLectureUseCase::new(repo, config)
            .execute(None)
            .await
            .unwrap();

        assert_eq!(export.filename, "responses_lecture_01.csv");

        let lines: Vec<&str> = export.body.lines().collect();
        assert_eq!(lines[0], EXPORT_COLUMNS.join(","));
        assert_eq!(lines.len(), 3);

        // Single-choice answers export as-is; the prompt is alongside.
        assert!(lines[1].contains("Strongly Agree"));
        assert!(lines[1].contains("single_choice"));

        // Map answers flatten to JSON text; the comma inside forces quoting.
        assert!(lines[2].contains("multi_field"));
        assert!(
            lines[2].contains(r#""{""con"":""fragile"",""pro"":""fast, cheap""}""#),
            "got: {}",
            lines[2]
        );
    }
}

#[cfg(test)]
mod dto_tests {
    use crate::domain::question::{Question, QuestionKind};
    use crate::domain::value_objects::Answer;
    use crate::presentation::dto::{QuestionView, SubmitRequest};
    use kernel::label::QuestionId;

    #[test]
    fn test_submit_request_deserialization() {
        let json = r#"{"netid":"abc123","questionId":"q1","answer":"Strongly Agree"}"#;
        let request: SubmitRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.netid, "abc123");
        assert_eq!(request.question_id, "q1");
        assert_eq!(request.answer, Answer::Text("Strongly Agree".to_string()));
    }

    #[test]
    fn test_submit_request_with_selection_list() {
        let json = r#"{"netid":"abc123","questionId":"q1","answer":["A","B"]}"#;
        let request: SubmitRequest = serde_json::from_str(json).unwrap();

        assert!(matches!(request.answer, Answer::Selections(ref s) if s.len() == 2));
    }

    #[test]
    fn test_question_view_single_choice() {
        let question = Question {
            question_id: QuestionId::new("q1").unwrap(),
            prompt: "Pick".to_string(),
            kind: QuestionKind::SingleChoice {
                options: vec!["A".to_string(), "B".to_string()],
            },
        };

        let json = serde_json::to_string(&QuestionView::from(&question)).unwrap();
        assert!(json.contains(r#""type":"single_choice""#));
        assert!(json.contains(r#""options":["A","B"]"#));
        assert!(!json.contains("fields"));
    }

    #[test]
    fn test_question_view_multi_choice_fills_max() {
        let question = Question {
            question_id: QuestionId::new("q1").unwrap(),
            prompt: "Pick some".to_string(),
            kind: QuestionKind::MultiChoice {
                options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
                min_selections: 1,
                max_selections: None,
            },
        };

        let view = QuestionView::from(&question);
        assert_eq!(view.min_selections, Some(1));
        assert_eq!(view.max_selections, Some(3));
    }

    #[test]
    fn test_question_view_text_has_no_options() {
        let question = Question {
            question_id: QuestionId::new("q2").unwrap(),
            prompt: "Why?".to_string(),
            kind: QuestionKind::Text,
        };

        let json = serde_json::to_string(&QuestionView::from(&question)).unwrap();
        assert!(json.contains(r#""type":"text""#));
        assert!(!json.contains("options"));
    }
}

#[cfg(test)]
mod error_tests {
    use crate::domain::question::AnswerError;
    use crate::error::PollError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use kernel::label::{LabelError, NetId};

    #[test]
    fn test_error_status_codes() {
        let invalid = NetId::new("").unwrap_err();
        let test_cases: Vec<(PollError, StatusCode)> = vec![
            (PollError::InvalidLabel(invalid), StatusCode::BAD_REQUEST),
            (
                PollError::Incomplete(AnswerError::Empty),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                PollError::QuestionNotFound("q9".into()),
                StatusCode::NOT_FOUND,
            ),
            (PollError::QuestionNotLive("q2".into()), StatusCode::CONFLICT),
            (PollError::NoLiveQuestion, StatusCode::NOT_FOUND),
            (
                PollError::LectureNotFound("lecture_99".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                PollError::NoResponses("lecture_01".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                PollError::BankConfig {
                    lecture: "lecture_01".into(),
                    message: "unknown variant".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (PollError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                PollError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            let status = error.status_code();
            let response = error.into_response();
            assert_eq!(status, expected_status);
            assert_eq!(response.status(), expected_status);
        }
    }

    #[test]
    fn test_transient_database_errors_are_503() {
        let err = PollError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_label_error_messages_name_the_kind() {
        let err: LabelError = NetId::new("  ").unwrap_err();
        assert!(err.to_string().contains("netid"));
    }
}
