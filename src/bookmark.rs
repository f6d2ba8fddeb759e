use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub href: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_uri: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Open folders at the time the bookmark was read, joined by the
    /// configured separator. Empty at top level.
    #[serde(default)]
    pub folder_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visited: Option<DateTime<Utc>>,
    #[serde(default)]
    pub private: bool,
}

impl Bookmark {
    pub fn is_bookmarklet(&self) -> bool {
        self.href.starts_with("javascript:")
    }

    /// Folder names from outermost to innermost.
    pub fn folders<'a>(&'a self, separator: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.folder_path
            .split(separator)
            .filter(move |_| !self.folder_path.is_empty())
    }
}
