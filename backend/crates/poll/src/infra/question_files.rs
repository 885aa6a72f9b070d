//! Filesystem Question Banks
//!
//! Loads per-lecture question banks from `questions_{lecture}.json` files
//! in a configured directory. Banks are external configuration: read-only
//! at runtime, re-read on each access so edits show up without a restart.

use crate::domain::question::QuestionBank;
use crate::domain::repository::QuestionBankRepository;
use crate::error::{PollError, PollResult};
use kernel::label::LectureId;
use std::path::PathBuf;

const FILE_PREFIX: &str = "questions_";
const FILE_SUFFIX: &str = ".json";

/// Question banks backed by a directory of JSON files
#[derive(Debug, Clone)]
pub struct FsQuestionBanks {
    dir: PathBuf,
}

impl FsQuestionBanks {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, lecture: &LectureId) -> PathBuf {
        self.dir
            .join(format!("{FILE_PREFIX}{lecture}{FILE_SUFFIX}"))
    }

    fn lecture_from_file_name(name: &str) -> Option<LectureId> {
        let middle = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
        LectureId::new(middle).ok()
    }
}

impl QuestionBankRepository for FsQuestionBanks {
    async fn available(&self) -> PollResult<Vec<LectureId>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            // A missing directory just means no lectures are configured.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(PollError::Internal(format!(
                    "read {}: {e}",
                    self.dir.display()
                )));
            }
        };

        let mut lectures = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| PollError::Internal(format!("read {}: {e}", self.dir.display())))?
        {
            let name = entry.file_name();
            if let Some(lecture) = name.to_str().and_then(Self::lecture_from_file_name) {
                lectures.push(lecture);
            }
        }

        lectures.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        lectures.dedup();
        Ok(lectures)
    }

    async fn load(&self, lecture: &LectureId) -> PollResult<QuestionBank> {
        let path = self.path_for(lecture);
        let raw = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PollError::LectureNotFound(lecture.to_string())
            } else {
                PollError::Internal(format!("read {}: {e}", path.display()))
            }
        })?;

        serde_json::from_str(&raw).map_err(|e| PollError::BankConfig {
            lecture: lecture.to_string(),
            message: e.to_string(),
        })
    }
}
