pub mod anchor;
pub mod classify;
pub mod diagnostics;
pub mod entities;
pub mod walker;

use std::path::Path;

use tracing::debug;

use crate::bookmark::Bookmark;
use crate::error::{Error, FormatError};
use crate::options::Options;
use diagnostics::Parsed;

pub const MAGIC_PREFIX: &str = "<!DOCTYPE NETSCAPE-Bookmark-file-1>";

/// Document → bookmarks, in document order.
///
/// The only structural check is the `<!DOCTYPE NETSCAPE-Bookmark-file-1>`
/// header at offset 0. Everything past it is recovered from where possible;
/// see [`parse_with_diagnostics`] for what was recovered.
pub fn parse(document: &str, options: &Options) -> Result<Vec<Bookmark>, FormatError> {
    parse_with_diagnostics(document, options).map(|p| p.bookmarks)
}

pub fn parse_with_diagnostics(document: &str, options: &Options) -> Result<Parsed, FormatError> {
    if !document.starts_with(MAGIC_PREFIX) {
        return Err(FormatError::NotABookmarkFile);
    }
    Ok(walker::walk(document, options))
}

pub fn parse_file(path: impl AsRef<Path>, options: &Options) -> Result<Vec<Bookmark>, Error> {
    parse_file_with_diagnostics(path, options).map(|p| p.bookmarks)
}

pub fn parse_file_with_diagnostics(path: impl AsRef<Path>, options: &Options) -> Result<Parsed, Error> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading bookmark file");
    let document = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_with_diagnostics(&document, options)?)
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::parser::diagnostics::DiagnosticKind;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    fn slash() -> Options {
        Options::default().with_separator("/")
    }

    #[test]
    fn rejects_missing_header() {
        assert_eq!(
            parse("not a bookmark file", &Options::default()),
            Err(FormatError::NotABookmarkFile)
        );
    }

    #[test]
    fn header_is_case_sensitive_and_at_offset_zero() {
        let opts = Options::default();
        assert!(parse(" <!DOCTYPE NETSCAPE-Bookmark-file-1>", &opts).is_err());
        assert!(parse("<!doctype netscape-bookmark-file-1>", &opts).is_err());
        assert!(parse("", &opts).is_err());
    }

    #[test]
    fn header_only_is_empty() {
        let bms = parse("<!DOCTYPE NETSCAPE-Bookmark-file-1>ffsdffsdfsdf", &Options::default()).unwrap();
        assert!(bms.is_empty());
    }

    #[test]
    fn minimal_document() {
        let bms = parse(
            r#"<!DOCTYPE NETSCAPE-Bookmark-file-1><DT><A HREF="http://e.com">E</A>"#,
            &Options::default(),
        )
        .unwrap();
        assert_eq!(bms.len(), 1);
        assert_eq!(bms[0].href, "http://e.com");
        assert_eq!(bms[0].title, "E");
        assert_eq!(bms[0].folder_path, "");
    }

    #[test]
    fn default_separator_used() {
        let doc = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1><DT><H3>A</H3><DL><p><DT><H3>B</H3><DL><p><DT><A HREF="x">x</A>"#;
        let bms = parse(doc, &Options::default()).unwrap();
        assert_eq!(bms[0].folder_path, "A␝B");
    }

    #[test]
    fn bookmarklets_filtered_by_default() {
        let doc = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<DT><A HREF="javascript:void(0)">Tool</A>
<DT><A HREF="https://e.com">E</A>"#;
        let bms = parse(doc, &Options::default()).unwrap();
        assert_eq!(bms.len(), 1);
        assert!(bms.iter().all(|b| !b.href.starts_with("javascript:")));

        let bms = parse(doc, &Options::default().with_bookmarklets_ignored(false)).unwrap();
        assert_eq!(bms.len(), 2);
        assert_eq!(bms[0].href, "javascript:void(0)");
        assert_eq!(bms[0].title, "Tool");
    }

    #[test]
    fn descriptions_only_when_enabled() {
        let doc = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<DT><A HREF="https://e.com">E</A>
<DD>An example
    site
<DT><A HREF="https://f.com">F</A>"#;
        let bms = parse(doc, &Options::default()).unwrap();
        assert!(bms.iter().all(|b| b.description.is_none()));

        let bms = parse(doc, &Options::default().with_descriptions(true)).unwrap();
        assert_eq!(bms[0].description.as_deref(), Some("An example site"));
        assert_eq!(bms[0].title, "E");
        assert!(bms[1].description.is_none());
    }

    #[test]
    fn unbalanced_close_absorbed() {
        let doc = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<DT><A HREF="a">A</A>
</DL><p>
</DL><p>
<DT><H3>F</H3>
<DL><p>
<DT><A HREF="b">B</A>"#;
        let parsed = parse_with_diagnostics(doc, &slash()).unwrap();
        assert_eq!(parsed.bookmarks[0].folder_path, "");
        assert_eq!(parsed.bookmarks[1].folder_path, "F");
        assert_eq!(
            parsed.diagnostics.last().map(|d| &d.kind),
            Some(&DiagnosticKind::UnclosedFolders { depth: 1 })
        );
    }

    #[test]
    fn timestamp_failure_keeps_record() {
        let doc = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1><DT><A HREF="x" ADD_DATE="abc" LAST_VISITED="1000000000">t</A>"#;
        let parsed = parse_with_diagnostics(doc, &Options::default()).unwrap();
        assert_eq!(parsed.bookmarks.len(), 1);
        assert!(parsed.bookmarks[0].add_date.is_none());
        assert_eq!(parsed.bookmarks[0].last_visited, DateTime::from_timestamp(1_000_000_000, 0));
        assert_eq!(parsed.diagnostics.len(), 1);
    }

    #[test]
    fn chrome_export() {
        let parsed = parse_with_diagnostics(&fixture("chrome"), &slash()).unwrap();
        assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
        let got: Vec<(&str, &str)> = parsed
            .bookmarks
            .iter()
            .map(|b| (b.title.as_str(), b.folder_path.as_str()))
            .collect();
        assert_eq!(
            got,
            [
                ("Rust Programming Language", "Bookmarks bar"),
                ("docs.rs", "Bookmarks bar/Dev/Rust"),
                ("crates.io: Rust Package Registry", "Bookmarks bar/Dev/Rust"),
                ("GitHub", "Bookmarks bar/Dev"),
                ("Hacker News", "Bookmarks bar"),
                ("Tom & Jerry's \"Wiki\"", "Other bookmarks"),
                ("Loose link", ""),
            ]
        );
        let rust = &parsed.bookmarks[0];
        assert_eq!(rust.href, "https://www.rust-lang.org/");
        assert_eq!(rust.add_date, DateTime::from_timestamp(1_577_836_800, 0));
        assert!(rust.icon.as_deref().unwrap_or("").starts_with("data:image/png;base64,"));
    }

    #[test]
    fn firefox_export() {
        let opts = slash().with_descriptions(true);
        let bms = parse(&fixture("firefox"), &opts).unwrap();
        assert_eq!(bms.len(), 4);

        assert_eq!(bms[0].title, "Getting Started");
        assert_eq!(bms[0].folder_path, "Bookmarks Toolbar");
        assert_eq!(bms[0].icon_uri.as_deref(), Some("https://www.mozilla.org/favicon.ico"));
        assert_eq!(bms[0].tags, ["firefox", "help"]);
        assert_eq!(bms[0].last_modified, DateTime::from_timestamp(1_600_000_100, 0));

        assert_eq!(bms[1].title, "Private notes");
        assert!(bms[1].private);
        assert_eq!(bms[1].description.as_deref(), Some("Only for me"));
        assert_eq!(bms[1].folder_path, "Bookmarks Toolbar/Personal");

        assert_eq!(bms[2].title, "Mozilla Support");
        assert_eq!(bms[2].folder_path, "");
        assert_eq!(bms[2].description.as_deref(), Some("Help pages"));

        assert_eq!(bms[3].title, "Empty-folder neighbour");
        assert_eq!(bms[3].folder_path, "");
    }

    #[test]
    fn firefox_bookmarklet_kept_when_asked() {
        let opts = slash().with_bookmarklets_ignored(false);
        let bms = parse(&fixture("firefox"), &opts).unwrap();
        let tool: Vec<_> = bms.iter().filter(|b| b.is_bookmarklet()).collect();
        assert_eq!(tool.len(), 1);
        assert_eq!(tool[0].title, "Share");
        assert_eq!(tool[0].folder_path, "Bookmarks Toolbar");
    }

    #[test]
    fn parse_file_missing() {
        let err = parse_file("tests/fixtures/does-not-exist.html", &Options::default()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn parse_file_not_bookmarks() {
        let err = parse_file("Cargo.toml", &Options::default()).unwrap_err();
        assert!(matches!(err, Error::Format(FormatError::NotABookmarkFile)));
    }
}
