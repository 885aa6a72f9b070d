//! Domain Services
//!
//! Pure tally logic over snapshot reads. Counts reflect whatever the read
//! returned; a write committed mid-query may be missed, which is acceptable.

use crate::domain::entities::Response;
use crate::domain::question::{Question, QuestionKind};
use crate::domain::value_objects::Answer;

/// Count for one configured option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionCount {
    pub option: String,
    pub count: u64,
}

/// Tally of one question's responses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tally {
    /// Per-option counts, zero-filled, in configured option order
    Options(Vec<OptionCount>),
    /// Question types without an option axis only report a total
    Freeform { total: u64 },
}

/// Tally responses for a question, dispatched by question type
pub fn tally_responses(question: &Question, responses: &[Response]) -> Tally {
    match &question.kind {
        QuestionKind::SingleChoice { options } => Tally::Options(
            options
                .iter()
                .map(|opt| OptionCount {
                    option: opt.clone(),
                    count: responses
                        .iter()
                        .filter(|r| matches!(&r.answer, Answer::Text(s) if s == opt))
                        .count() as u64,
                })
                .collect(),
        ),
        QuestionKind::MultiChoice { options, .. } => Tally::Options(
            options
                .iter()
                .map(|opt| OptionCount {
                    option: opt.clone(),
                    count: responses
                        .iter()
                        .filter(
                            |r| matches!(&r.answer, Answer::Selections(sel) if sel.contains(opt)),
                        )
                        .count() as u64,
                })
                .collect(),
        ),
        QuestionKind::Text | QuestionKind::MultiField { .. } => Tally::Freeform {
            total: responses.len() as u64,
        },
    }
}
