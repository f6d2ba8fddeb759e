use std::sync::LazyLock;

use regex::Regex;

static FOLDER_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<H3(?:[^>"]|"[^"]*")*>(.*?)</H3>"#).unwrap());
static FOLDER_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:</DL>\s*<p>\s*(?:<HR>\s*)?)+$").unwrap());

/// What a normalized chunk asks the walker to do. A single chunk can carry
/// more than one of these, e.g. a bookmark followed by the close of its
/// folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChunkKind {
    pub opens_folder: bool,
    pub is_anchor: bool,
    pub closes: usize,
}

pub fn classify(chunk: &str) -> ChunkKind {
    ChunkKind {
        opens_folder: is_folder_open(chunk),
        is_anchor: is_anchor(chunk),
        closes: folder_closes(chunk),
    }
}

pub fn is_folder_open(chunk: &str) -> bool {
    starts_with_ignore_case(chunk, "<H3")
}

pub fn is_anchor(chunk: &str) -> bool {
    starts_with_ignore_case(chunk, "<A")
}

/// Number of `</DL><p>` groups (each optionally followed by `<HR>`) at the
/// end of the chunk.
pub fn folder_closes(chunk: &str) -> usize {
    FOLDER_CLOSE_RE
        .find(chunk)
        .map(|m| m.as_str().matches("</DL>").count())
        .unwrap_or(0)
}

/// Cut the trailing folder closes off a piece of a chunk.
pub fn strip_folder_closes(text: &str) -> &str {
    match FOLDER_CLOSE_RE.find(text) {
        Some(m) => &text[..m.start()],
        None => text,
    }
}

/// Trimmed text between the first `<H3 ...>` and the following `</H3>`.
pub fn folder_title(chunk: &str) -> Option<&str> {
    FOLDER_TITLE_RE
        .captures(chunk)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
