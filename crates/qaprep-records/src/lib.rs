//! QA training records for qaprep
//!
//! The shared data model and format conversions for handbook QA data:
//! - `TrainingRecord`: one question/context/answer triple
//! - Flat-text parsing (`Question:/Context:/Answer:` blocks, two modes)
//! - Line-delimited JSON and batch-array serialization
//! - Prompt/completion formatting for downstream fine-tuning frameworks
//!
//! Everything here is a single-pass transformation over in-memory values;
//! file IO and command wiring live in `qaprep-cli`.

pub mod error;
pub mod parse;
pub mod prompt;
pub mod record;
pub mod serialize;

pub use error::*;
pub use parse::*;
pub use prompt::*;
pub use record::*;
pub use serialize::*;
