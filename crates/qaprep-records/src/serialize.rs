//! Record serialization: line-delimited JSON, the batch QA array, and the
//! flat text format.
//!
//! Flat-text emission is the exact inverse of fixed-stride parsing, so a
//! batch array converted to flat text and parsed back is lossless (modulo
//! the trailing blank separator).

use crate::error::RecordError;
use crate::record::{QaTrainingEntry, TrainingRecord};

/// Serialize records as line-delimited JSON, one compact object per line,
/// keys in `question`, `answer`, `context` order.
pub fn to_jsonl(records: &[TrainingRecord]) -> String {
    let mut out = String::new();
    for record in records {
        // Serialization of a plain string struct cannot fail.
        out.push_str(&serde_json::to_string(record).unwrap_or_default());
        out.push('\n');
    }
    out
}

/// Parse line-delimited JSON back into records. Blank lines are skipped; a
/// line that is not a valid JSON record aborts with its line number.
pub fn from_jsonl(text: &str) -> Result<Vec<TrainingRecord>, RecordError> {
    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: TrainingRecord =
            serde_json::from_str(line).map_err(|e| RecordError::Parse {
                line: idx + 1,
                msg: e.to_string(),
            })?;
        records.push(record);
    }
    Ok(records)
}

/// Parse a batch training-data JSON array (the extractive-QA format).
pub fn entries_from_json(text: &str) -> Result<Vec<QaTrainingEntry>, RecordError> {
    serde_json::from_str(text).map_err(|e| RecordError::Parse {
        line: e.line(),
        msg: e.to_string(),
    })
}

fn push_block(out: &mut String, question: &str, context: &str, answer: &str) {
    out.push_str("Question: ");
    out.push_str(question);
    out.push_str("\nContext: ");
    out.push_str(context);
    out.push_str("\nAnswer: ");
    out.push_str(answer);
    out.push_str("\n\n");
}

/// Emit records in the flat block format.
pub fn records_to_flat_text(records: &[TrainingRecord]) -> String {
    let mut out = String::new();
    for r in records {
        push_block(&mut out, &r.question, &r.context, &r.answer);
    }
    out
}

/// Emit batch entries in the flat block format. The answer line carries the
/// first span text (empty when the span has none).
pub fn entries_to_flat_text(entries: &[QaTrainingEntry]) -> String {
    let mut out = String::new();
    for e in entries {
        let answer = e.answers.text.first().map(String::as_str).unwrap_or("");
        push_block(&mut out, &e.question, &e.context, answer);
    }
    out
}
