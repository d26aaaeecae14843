//! Error taxonomy for record loading and parsing.

use std::path::Path;

/// Errors surfaced by record IO and deserialization.
///
/// Policy per variant:
/// - `MissingFile` is fatal; the run aborts.
/// - `Parse` aborts strict JSON loading (line-oriented parsers skip bad
///   lines before this error can arise).
/// - `MissingField` is skip-and-continue; callers log and move on.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("missing input file: {path}")]
    MissingFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: invalid JSON record: {msg}")]
    Parse { line: usize, msg: String },

    #[error("record missing required field `{field}`")]
    MissingField { field: String },
}

/// Read a UTF-8 input file, mapping IO failure to `MissingFile` so the
/// offending path shows up in the message.
pub fn read_input(path: &Path) -> Result<String, RecordError> {
    std::fs::read_to_string(path).map_err(|source| RecordError::MissingFile {
        path: path.display().to_string(),
        source,
    })
}
