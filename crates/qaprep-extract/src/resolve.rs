//! Dotted-path resolution over arbitrary JSON documents.
//!
//! A dotted path like `handbook.institution_info.name.former_names` is
//! resolved one key at a time. Objects descend by key; a list applies the
//! key across every element and joins the results (`"; "` when everything is
//! a string, otherwise a space-joined stringification of the non-empty
//! values). A missing key contributes an empty object, so resolution keeps
//! going and simply ends on a non-string; the caller gets `None` rather
//! than an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use qaprep_records::{AnswerSpan, QaTrainingEntry};

/// Resolve a dotted path against a document. Returns `None` when a key is
/// absent at some level or the final value is not a string.
pub fn resolve(doc: &Value, dotted_path: &str) -> Option<String> {
    let mut node = Node::Borrowed(doc);
    for key in dotted_path.split('.') {
        node = descend(node, key)?;
    }
    match node.value() {
        Value::String(s) => Some(s.clone()),
        // A terminal list joins its elements directly.
        Value::Array(items) => match join_values(items.to_vec()) {
            Value::String(s) => Some(s),
            _ => None,
        },
        _ => None,
    }
}

/// Resolve against the primary document, falling back to the second; the
/// first non-`None` result wins.
pub fn resolve_either(primary: &Value, fallback: &Value, dotted_path: &str) -> Option<String> {
    resolve(primary, dotted_path).or_else(|| resolve(fallback, dotted_path))
}

/// Either a borrowed subtree of the input document or a value synthesized
/// during traversal (list joins, missing-key placeholders).
enum Node<'a> {
    Borrowed(&'a Value),
    Owned(Value),
}

impl Node<'_> {
    fn value(&self) -> &Value {
        match self {
            Node::Borrowed(v) => v,
            Node::Owned(v) => v,
        }
    }
}

fn descend<'a>(node: Node<'a>, key: &str) -> Option<Node<'a>> {
    match node {
        Node::Borrowed(Value::Object(map)) => Some(match map.get(key) {
            Some(child) => Node::Borrowed(child),
            None => Node::Owned(Value::Object(Default::default())),
        }),
        Node::Owned(Value::Object(mut map)) => Some(Node::Owned(
            map.remove(key)
                .unwrap_or_else(|| Value::Object(Default::default())),
        )),
        Node::Borrowed(Value::Array(items)) => Some(Node::Owned(join_list(items, key))),
        Node::Owned(Value::Array(items)) => Some(Node::Owned(join_list(&items, key))),
        // Scalar mid-path: unexpected structure.
        _ => None,
    }
}

/// Apply one key across every list element and join the results into a
/// single string value.
fn join_list(items: &[Value], key: &str) -> Value {
    let mapped: Vec<Value> = items
        .iter()
        .map(|item| match item {
            Value::Object(map) => map
                .get(key)
                .cloned()
                .unwrap_or_else(|| Value::Object(Default::default())),
            other => other.clone(),
        })
        .collect();
    join_values(mapped)
}

/// Join already-resolved list values: `"; "` when everything is a string,
/// otherwise a space-join of the stringified non-empty values.
fn join_values(mapped: Vec<Value>) -> Value {
    let joined = if mapped.iter().all(Value::is_string) {
        mapped
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("; ")
    } else {
        mapped
            .iter()
            .filter(|v| !is_empty_value(v))
            .map(stringify)
            .collect::<Vec<_>>()
            .join(" ")
    };
    Value::String(joined)
}

fn is_empty_value(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn stringify(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Hand-authored question → dotted-key mapping, loaded from a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub question: String,
    pub key: String,
}

/// Resolve each question's key against the two documents and build batch QA
/// entries. A question whose key resolves to nothing (or to an empty
/// string) is skipped and logged. The answer is always the whole context,
/// so `answer_start` is 0.
pub fn build_training_entries(
    primary: &Value,
    fallback: &Value,
    questions: &[QuestionSpec],
) -> Vec<QaTrainingEntry> {
    let mut entries = Vec::new();
    for spec in questions {
        match resolve_either(primary, fallback, &spec.key) {
            Some(context) if !context.is_empty() => {
                entries.push(QaTrainingEntry {
                    question: spec.question.clone(),
                    answers: AnswerSpan::whole_context(&context),
                    context,
                });
            }
            _ => {
                tracing::warn!(key = %spec.key, question = %spec.question, "key resolved to no usable context, skipping");
            }
        }
    }
    entries
}
