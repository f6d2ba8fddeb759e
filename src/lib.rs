//! Parse browser-exported Netscape Bookmark Files into typed records.
//!
//! The format is not well-formed HTML, so the document is treated as a flat
//! stream of `<DT>`-delimited chunks with an explicit folder stack rather than
//! a tree.

pub mod bookmark;
pub mod error;
pub mod options;
pub mod parser;
pub mod report;

pub use bookmark::Bookmark;
pub use error::{AnchorError, Error, FormatError};
pub use options::Options;
pub use parser::diagnostics::{Diagnostic, DiagnosticKind, Parsed};
pub use parser::{parse, parse_file, parse_with_diagnostics};
