//! Prompt/completion formatting for fine-tuning frameworks.
//!
//! Each downstream model family historically used a slightly different
//! input layout; the styles below cover all of them without the framework
//! itself ever seeing our record types.

use serde::{Deserialize, Serialize};

use crate::record::TrainingRecord;

/// Input layout for the prompt side of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptStyle {
    /// `Question: <q>\nContext: <c>`, labelled lines (causal LM style).
    #[default]
    Labelled,
    /// `question: <q> context: <c>`, single-line instruction style.
    Instruction,
    /// `<q>\n<c>`, bare concatenation.
    Plain,
}

impl std::str::FromStr for PromptStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "labelled" => Ok(PromptStyle::Labelled),
            "instruction" => Ok(PromptStyle::Instruction),
            "plain" => Ok(PromptStyle::Plain),
            other => Err(format!(
                "unknown prompt style `{other}` (expected `labelled`, `instruction`, or `plain`)"
            )),
        }
    }
}

/// One prompt/completion pair, serialized as a JSONL line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPair {
    pub input_text: String,
    pub output_text: String,
}

/// Format records as prompt/completion pairs. A record with neither a
/// question nor an answer carries no signal and is skipped.
pub fn format_prompts(records: &[TrainingRecord], style: PromptStyle) -> Vec<PromptPair> {
    records
        .iter()
        .filter(|r| !(r.question.is_empty() && r.answer.is_empty()))
        .map(|r| PromptPair {
            input_text: match style {
                PromptStyle::Labelled => {
                    format!("Question: {}\nContext: {}", r.question, r.context)
                }
                PromptStyle::Instruction => {
                    format!("question: {} context: {}", r.question, r.context)
                }
                PromptStyle::Plain => format!("{}\n{}", r.question, r.context),
            },
            output_text: r.answer.clone(),
        })
        .collect()
}

/// Serialize pairs as line-delimited JSON.
pub fn prompts_to_jsonl(pairs: &[PromptPair]) -> String {
    let mut out = String::new();
    for pair in pairs {
        out.push_str(&serde_json::to_string(pair).unwrap_or_default());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<TrainingRecord> {
        vec![TrainingRecord::new("Where?", "Home.", "Here.")]
    }

    #[test]
    fn labelled_style_keeps_field_labels() {
        let pairs = format_prompts(&sample(), PromptStyle::Labelled);
        assert_eq!(pairs[0].input_text, "Question: Where?\nContext: Here.");
        assert_eq!(pairs[0].output_text, "Home.");
    }

    #[test]
    fn instruction_style_is_single_line() {
        let pairs = format_prompts(&sample(), PromptStyle::Instruction);
        assert_eq!(pairs[0].input_text, "question: Where? context: Here.");
    }

    #[test]
    fn plain_style_joins_with_newline() {
        let pairs = format_prompts(&sample(), PromptStyle::Plain);
        assert_eq!(pairs[0].input_text, "Where?\nHere.");
    }

    #[test]
    fn empty_records_are_skipped() {
        let records = vec![TrainingRecord::new("", "", "context only")];
        assert!(format_prompts(&records, PromptStyle::Labelled).is_empty());
    }
}
