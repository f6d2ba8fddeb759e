use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use super::anchor::{read_anchor, rfind_anchor_close, ANCHOR_CLOSE};
use super::classify::{classify, folder_title, strip_folder_closes};
use super::diagnostics::{Diagnostic, DiagnosticKind, Parsed};
use crate::bookmark::Bookmark;
use crate::options::Options;

static SPACES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

pub const CHUNK_DELIMITER: &str = "<DT>";
const DESCRIPTION_MARKER: &str = "<DD>";

/// Drop newlines, collapse whitespace runs to one space, trim.
pub fn normalize(raw: &str) -> String {
    SPACES_RE
        .replace_all(&raw.replace('\n', ""), " ")
        .trim()
        .to_string()
}

/// Walk every `<DT>` chunk of an already validated document.
pub fn walk(document: &str, options: &Options) -> Parsed {
    let mut walker = Walker::new(options);
    for (idx, raw) in document.split(CHUNK_DELIMITER).enumerate() {
        walker.visit(idx, raw);
    }
    walker.finish()
}

struct Walker<'o> {
    options: &'o Options,
    folders: Vec<String>,
    bookmarks: Vec<Bookmark>,
    diagnostics: Vec<Diagnostic>,
    last_chunk: usize,
}

impl<'o> Walker<'o> {
    fn new(options: &'o Options) -> Self {
        Walker {
            options,
            folders: Vec::new(),
            bookmarks: Vec::new(),
            diagnostics: Vec::new(),
            last_chunk: 0,
        }
    }

    fn visit(&mut self, idx: usize, raw: &str) {
        self.last_chunk = idx;
        let chunk = normalize(raw);
        let kind = classify(&chunk);

        // ── <H3>: folder open ──
        if kind.opens_folder {
            self.open_folder(idx, &chunk);
        }

        // ── <A>: bookmark ──
        if kind.is_anchor {
            self.read_bookmark(idx, &chunk);
        }

        // ── </DL><p>: folder close, possibly several ──
        for _ in 0..kind.closes {
            self.close_folder();
        }
    }

    fn open_folder(&mut self, idx: usize, chunk: &str) {
        let title = match folder_title(chunk) {
            Some(t) => t.to_string(),
            None => {
                warn!(chunk = idx, "folder has no readable title");
                self.report(idx, DiagnosticKind::MissingFolderTitle);
                String::new()
            }
        };
        debug!(chunk = idx, folder = %title, depth = self.folders.len() + 1, "open folder");
        self.folders.push(title);
    }

    fn close_folder(&mut self) {
        if let Some(folder) = self.folders.pop() {
            debug!(folder = %folder, depth = self.folders.len(), "close folder");
        }
    }

    fn read_bookmark(&mut self, idx: usize, chunk: &str) {
        // <DT> is the only hard delimiter, so the chunk may run past the
        // anchor into a <DD> block or closing markup.
        let anchor_text = if chunk.ends_with(ANCHOR_CLOSE) {
            chunk
        } else {
            match rfind_anchor_close(chunk) {
                Some(end) => &chunk[..end + ANCHOR_CLOSE.len()],
                None => chunk,
            }
        };

        let anchor = match read_anchor(anchor_text) {
            Ok(a) => a,
            Err(e) => {
                warn!(chunk = idx, error = %e, "skipping malformed anchor");
                self.report(idx, DiagnosticKind::UnterminatedAnchor);
                return;
            }
        };
        let mut bm = anchor.bookmark;

        if self.options.ignore_bookmarklets && bm.is_bookmarklet() {
            debug!(chunk = idx, title = %bm.title, "skipping bookmarklet");
            return;
        }

        for (attribute, value) in anchor.invalid_timestamps {
            debug!(chunk = idx, %attribute, %value, "unreadable timestamp");
            self.report(idx, DiagnosticKind::InvalidTimestamp { attribute, value });
        }

        if self.options.parse_description {
            bm.description = description(chunk);
        }

        bm.folder_path = self.folders.join(&self.options.folder_path_separator);
        self.bookmarks.push(bm);
    }

    fn report(&mut self, chunk: usize, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic { chunk, kind });
    }

    fn finish(mut self) -> Parsed {
        if !self.folders.is_empty() {
            let depth = self.folders.len();
            warn!(depth, "document ended with open folders");
            self.report(self.last_chunk, DiagnosticKind::UnclosedFolders { depth });
        }
        info!(
            bookmarks = self.bookmarks.len(),
            diagnostics = self.diagnostics.len(),
            "parsed bookmark document"
        );
        Parsed {
            bookmarks: self.bookmarks,
            diagnostics: self.diagnostics,
        }
    }
}

/// Text after the single `<DD>` of a chunk, without any trailing folder
/// closes. More than one marker means the chunk is ambiguous and is skipped.
fn description(chunk: &str) -> Option<String> {
    let parts: Vec<&str> = chunk.split(DESCRIPTION_MARKER).collect();
    if parts.len() != 2 {
        return None;
    }
    let text = normalize(strip_folder_closes(parts[1]));
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
