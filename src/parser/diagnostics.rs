use std::fmt;

use super::anchor::Attribute;
use crate::bookmark::Bookmark;

/// Output of a parse together with every malformation that was recovered
/// from along the way.
#[derive(Debug, Clone, Default)]
pub struct Parsed {
    pub bookmarks: Vec<Bookmark>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Index of the `<DT>` chunk, 0 being the document header.
    pub chunk: usize,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Anchor chunk without any `</A>`. The chunk produced no bookmark.
    UnterminatedAnchor,
    /// `<H3` chunk whose title could not be read. An empty folder name was
    /// pushed in its place.
    MissingFolderTitle,
    InvalidTimestamp { attribute: Attribute, value: String },
    /// Folders still open when the document ended.
    UnclosedFolders { depth: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chunk {}: ", self.chunk)?;
        match &self.kind {
            DiagnosticKind::UnterminatedAnchor => write!(f, "anchor without </A>, skipped"),
            DiagnosticKind::MissingFolderTitle => write!(f, "folder without a readable <H3> title"),
            DiagnosticKind::InvalidTimestamp { attribute, value } => {
                write!(f, "{}={:?} is not a Unix timestamp, left empty", attribute, value)
            }
            DiagnosticKind::UnclosedFolders { depth } => {
                write!(f, "{} folder(s) still open at end of document", depth)
            }
        }
    }
}
