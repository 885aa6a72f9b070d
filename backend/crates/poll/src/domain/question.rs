//! Question Model
//!
//! Questions are a tagged union over question type, with one validator per
//! variant dispatched by tag. Banks are loaded from per-lecture JSON files
//! and are read-only at runtime.

use kernel::label::{CourseId, LectureId, QuestionId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::Answer;

/// Error returned when an answer fails its question's validator
///
/// Reported to the caller as an incomplete submission; the store is never
/// touched for a rejected answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("answer is empty")]
    Empty,

    #[error("expected {expected}, got {got}")]
    WrongShape {
        expected: &'static str,
        got: &'static str,
    },

    #[error("'{value}' is not one of the configured options")]
    UnknownOption { value: String },

    #[error("'{value}' is selected more than once")]
    DuplicateSelection { value: String },

    #[error("{got} selected, at least {min} required")]
    TooFewSelections { got: usize, min: usize },

    #[error("{got} selected, at most {max} allowed")]
    TooManySelections { got: usize, max: usize },

    #[error("'{field}' is not a configured field")]
    UnknownField { field: String },

    #[error("field '{field}' is empty")]
    EmptyField { field: String },

    #[error("at least one field must be filled in")]
    NothingFilledIn,
}

/// How multi-field answers combine their per-field rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    #[default]
    All,
    Any,
}

/// One input field of a multi-field question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
}

fn default_min_selections() -> usize {
    1
}

/// Question type variants with their configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    Text,
    SingleChoice {
        options: Vec<String>,
    },
    MultiChoice {
        options: Vec<String>,
        #[serde(default = "default_min_selections")]
        min_selections: usize,
        #[serde(default)]
        max_selections: Option<usize>,
    },
    MultiField {
        fields: Vec<FieldSpec>,
        #[serde(default)]
        require: Requirement,
    },
}

impl QuestionKind {
    /// Tag name, also persisted as the response's `question_type`
    pub fn type_name(&self) -> &'static str {
        match self {
            QuestionKind::Text => "text",
            QuestionKind::SingleChoice { .. } => "single_choice",
            QuestionKind::MultiChoice { .. } => "multi_choice",
            QuestionKind::MultiField { .. } => "multi_field",
        }
    }
}

/// One question definition from a lecture's bank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question_id: QuestionId,
    pub prompt: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    /// Validate an answer against this question's configuration
    pub fn validate(&self, answer: &Answer) -> Result<(), AnswerError> {
        match &self.kind {
            QuestionKind::Text => validate_text(answer),
            QuestionKind::SingleChoice { options } => validate_single_choice(options, answer),
            QuestionKind::MultiChoice {
                options,
                min_selections,
                max_selections,
            } => validate_multi_choice(options, *min_selections, *max_selections, answer),
            QuestionKind::MultiField { fields, require } => {
                validate_multi_field(fields, *require, answer)
            }
        }
    }
}

fn validate_text(answer: &Answer) -> Result<(), AnswerError> {
    match answer {
        Answer::Text(s) if s.trim().is_empty() => Err(AnswerError::Empty),
        Answer::Text(_) => Ok(()),
        other => Err(AnswerError::WrongShape {
            expected: "a string",
            got: other.shape(),
        }),
    }
}

fn validate_single_choice(options: &[String], answer: &Answer) -> Result<(), AnswerError> {
    match answer {
        Answer::Text(s) if options.iter().any(|opt| opt == s) => Ok(()),
        Answer::Text(s) => Err(AnswerError::UnknownOption { value: s.clone() }),
        other => Err(AnswerError::WrongShape {
            expected: "a string",
            got: other.shape(),
        }),
    }
}

fn validate_multi_choice(
    options: &[String],
    min_selections: usize,
    max_selections: Option<usize>,
    answer: &Answer,
) -> Result<(), AnswerError> {
    let Answer::Selections(selected) = answer else {
        return Err(AnswerError::WrongShape {
            expected: "a list of selections",
            got: answer.shape(),
        });
    };

    for (i, value) in selected.iter().enumerate() {
        if !options.iter().any(|opt| opt == value) {
            return Err(AnswerError::UnknownOption {
                value: value.clone(),
            });
        }
        if selected[..i].contains(value) {
            return Err(AnswerError::DuplicateSelection {
                value: value.clone(),
            });
        }
    }

    let max = max_selections.unwrap_or(options.len());
    if selected.len() < min_selections {
        return Err(AnswerError::TooFewSelections {
            got: selected.len(),
            min: min_selections,
        });
    }
    if selected.len() > max {
        return Err(AnswerError::TooManySelections {
            got: selected.len(),
            max,
        });
    }

    Ok(())
}

fn validate_multi_field(
    fields: &[FieldSpec],
    require: Requirement,
    answer: &Answer,
) -> Result<(), AnswerError> {
    let Answer::Fields(filled) = answer else {
        return Err(AnswerError::WrongShape {
            expected: "a map of fields",
            got: answer.shape(),
        });
    };

    for key in filled.keys() {
        if !fields.iter().any(|f| &f.key == key) {
            return Err(AnswerError::UnknownField { field: key.clone() });
        }
    }

    let is_filled = |spec: &FieldSpec| {
        filled
            .get(&spec.key)
            .is_some_and(|v| !v.trim().is_empty())
    };

    match require {
        Requirement::All => {
            for spec in fields {
                if !is_filled(spec) {
                    return Err(AnswerError::EmptyField {
                        field: spec.key.clone(),
                    });
                }
            }
            Ok(())
        }
        Requirement::Any => {
            if fields.iter().any(is_filled) {
                Ok(())
            } else {
                Err(AnswerError::NothingFilledIn)
            }
        }
    }
}

/// The ordered question bank of one lecture
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionBank {
    pub course: CourseId,
    pub lecture: LectureId,
    #[serde(default)]
    pub title: String,
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// Look up a question by id
    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.question_id == id)
    }
}
