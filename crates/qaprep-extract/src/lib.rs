//! Handbook extraction for qaprep
//!
//! Turns source documents into question/context material:
//! - PDF page text, keyed `Page_1`, `Page_2`, … (the primary document)
//! - Dotted-path resolution over arbitrary JSON documents
//! - Question-table resolution into batch QA training entries
//!
//! The two source documents are hand-authored with inconsistent schemas, so
//! resolution is deliberately permissive: an absent key or a non-string
//! terminal yields `None`, never an error.

pub mod pdf;
pub mod resolve;

pub use pdf::{extract_pages, PdfError};
pub use resolve::*;
