use std::path::PathBuf;

use thiserror::Error;

/// Whole-document failure. No records are returned alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("not a Netscape bookmark file (missing <!DOCTYPE NETSCAPE-Bookmark-file-1> header)")]
    NotABookmarkFile,
}

/// Failure to read a single anchor. The walker turns this into a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnchorError {
    #[error("anchor has no closing </A> tag")]
    Unterminated,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
