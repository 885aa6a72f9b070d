//! Application Configuration
//!
//! Configuration for the poll application layer.

use std::path::PathBuf;

use kernel::label::{CourseId, LectureId, SessionId};

/// Poll application configuration
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Course this deployment serves (state is a singleton per course)
    pub course: CourseId,
    /// Lecture used when the class state is first created
    pub default_lecture: LectureId,
    /// Session label used when the class state is first created
    pub default_session: SessionId,
    /// Instructor passcode, compared in constant time on privileged routes
    pub instructor_key: String,
    /// Directory holding `questions_{lecture}.json` files
    pub questions_dir: PathBuf,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            course: CourseId::from_db("GBA468"),
            default_lecture: LectureId::from_db("lecture_01"),
            default_session: SessionId::from_db("session_01"),
            instructor_key: "change-me".to_string(),
            questions_dir: PathBuf::from("questions"),
        }
    }
}

impl PollConfig {
    /// True when the deployment still runs with the placeholder passcode
    pub fn has_placeholder_key(&self) -> bool {
        self.instructor_key == "change-me"
    }
}
