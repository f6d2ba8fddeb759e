/// Group separator symbol. Folder names practically never contain it.
pub const DEFAULT_FOLDER_PATH_SEPARATOR: &str = "\u{241D}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// String placed between folder names in `Bookmark::folder_path`.
    pub folder_path_separator: String,
    /// Capture the `<DD>` text that follows an anchor.
    pub parse_description: bool,
    /// Drop bookmarks whose href starts with `javascript:`.
    pub ignore_bookmarklets: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            folder_path_separator: DEFAULT_FOLDER_PATH_SEPARATOR.to_string(),
            parse_description: false,
            ignore_bookmarklets: true,
        }
    }
}

impl Options {
    pub fn with_separator(self, separator: impl Into<String>) -> Self {
        Options {
            folder_path_separator: separator.into(),
            ..self
        }
    }

    pub fn with_descriptions(self, parse_description: bool) -> Self {
        Options {
            parse_description,
            ..self
        }
    }

    pub fn with_bookmarklets_ignored(self, ignore_bookmarklets: bool) -> Self {
        Options {
            ignore_bookmarklets,
            ..self
        }
    }
}
