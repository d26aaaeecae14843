//! Flat-text parsing.
//!
//! The flat format is repeated blocks of:
//!
//! ```text
//! Question: <q>
//! Context: <c>
//! Answer: <a>
//!
//! ```
//!
//! Two parsing policies exist, kept from the two historical converters:
//!
//! - [`ParseMode::FixedStride`] groups every four lines into one record and
//!   strips the literal label prefixes. Useful only for strictly regular
//!   input; malformed trailing groups are dropped, and a missing label
//!   leaves the field as the trimmed line (empty-string when blank).
//! - [`ParseMode::Stateful`] scans line by line and accumulates fields on
//!   prefix match, emitting on each `Answer:` line. It tolerates ragged
//!   input (extra blank lines, uneven block lengths) and skips incomplete
//!   blocks, so it is the default.

use crate::record::TrainingRecord;

const QUESTION_PREFIX: &str = "Question:";
const CONTEXT_PREFIX: &str = "Context:";
const ANSWER_PREFIX: &str = "Answer:";

/// Parsing policy for the flat text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Prefix-driven accumulator scan; tolerant of ragged input.
    #[default]
    Stateful,
    /// Every four lines form one block; strict layout only.
    FixedStride,
}

impl std::str::FromStr for ParseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stateful" => Ok(ParseMode::Stateful),
            "fixed-stride" => Ok(ParseMode::FixedStride),
            other => Err(format!(
                "unknown parse mode `{other}` (expected `stateful` or `fixed-stride`)"
            )),
        }
    }
}

/// Parse flat text into records under the given policy.
pub fn parse_flat_text(text: &str, mode: ParseMode) -> Vec<TrainingRecord> {
    let lines: Vec<&str> = text.lines().collect();
    match mode {
        ParseMode::Stateful => parse_stateful(&lines),
        ParseMode::FixedStride => parse_fixed_stride(&lines),
    }
}

/// Strip `prefix` from the trimmed line; a line without the label passes
/// through trimmed (so a blank separator yields an empty field).
fn strip_label<'a>(line: &'a str, prefix: &str) -> &'a str {
    let trimmed = line.trim();
    trimmed
        .strip_prefix(prefix)
        .map(str::trim_start)
        .unwrap_or(trimmed)
}

fn parse_fixed_stride(lines: &[&str]) -> Vec<TrainingRecord> {
    let mut records = Vec::new();
    let mut i = 0;
    while i + 2 < lines.len() {
        records.push(TrainingRecord {
            question: strip_label(lines[i], QUESTION_PREFIX).to_string(),
            answer: strip_label(lines[i + 2], ANSWER_PREFIX).to_string(),
            context: strip_label(lines[i + 1], CONTEXT_PREFIX).to_string(),
        });
        // 4th line is the blank separator.
        i += 4;
    }
    records
}

/// Accumulates fields until an `Answer:` line triggers an emit.
#[derive(Default)]
struct Accumulator {
    question: Option<String>,
    context: Option<String>,
}

impl Accumulator {
    fn emit(&mut self, answer: String) -> Option<TrainingRecord> {
        let record = match (self.question.take(), self.context.take()) {
            (Some(question), Some(context)) => Some(TrainingRecord {
                question,
                answer,
                context,
            }),
            (question, context) => {
                tracing::warn!(
                    has_question = question.is_some(),
                    has_context = context.is_some(),
                    "skipping incomplete block at Answer: line"
                );
                None
            }
        };
        *self = Accumulator::default();
        record
    }
}

fn parse_stateful(lines: &[&str]) -> Vec<TrainingRecord> {
    let mut records = Vec::new();
    let mut acc = Accumulator::default();

    for line in lines {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix(QUESTION_PREFIX) {
            acc.question = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix(CONTEXT_PREFIX) {
            acc.context = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix(ANSWER_PREFIX) {
            records.extend(acc.emit(rest.trim().to_string()));
        }
        // Anything else (blank separators, stray prose) is ignored.
    }

    // A partial accumulator at end of input is discarded.
    records
}
