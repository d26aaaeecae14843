//! Record types shared across the workspace.

use serde::{Deserialize, Serialize};

/// One question/context/answer triple.
///
/// Field order matters for serialization: line-delimited JSON emits keys in
/// `question`, `answer`, `context` order, which downstream consumers expect
/// to round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub question: String,
    pub answer: String,
    pub context: String,
}

impl TrainingRecord {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            context: context.into(),
        }
    }
}

/// Answer span in the extractive-QA batch format.
///
/// Invariant: both vectors have length 1 and `answer_start[0] == 0`: the
/// answer is always the entire context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSpan {
    pub text: Vec<String>,
    pub answer_start: Vec<usize>,
}

impl AnswerSpan {
    /// Span covering the whole context.
    pub fn whole_context(context: &str) -> Self {
        Self {
            text: vec![context.to_string()],
            answer_start: vec![0],
        }
    }

    /// Whether both parallel vectors are populated.
    pub fn is_complete(&self) -> bool {
        !self.text.is_empty() && !self.answer_start.is_empty()
    }
}

/// One element of the batch training-data JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaTrainingEntry {
    pub question: String,
    pub context: String,
    pub answers: AnswerSpan,
}

impl QaTrainingEntry {
    /// Flatten into a `TrainingRecord`; the answer is the first span text,
    /// empty when the span carries none.
    pub fn to_record(&self) -> TrainingRecord {
        TrainingRecord {
            question: self.question.clone(),
            answer: self.answers.text.first().cloned().unwrap_or_default(),
            context: self.context.clone(),
        }
    }
}

/// Drop entries whose answer span is incomplete, returning the survivors and
/// the number of entries dropped. Each drop is logged and processing
/// continues.
pub fn filter_complete(entries: Vec<QaTrainingEntry>) -> (Vec<QaTrainingEntry>, usize) {
    let total = entries.len();
    let kept: Vec<QaTrainingEntry> = entries
        .into_iter()
        .filter(|e| {
            if e.answers.is_complete() {
                true
            } else {
                tracing::warn!(question = %e.question, "skipping entry with incomplete answers");
                false
            }
        })
        .collect();
    let dropped = total - kept.len();
    (kept, dropped)
}
