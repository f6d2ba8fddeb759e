use std::collections::{BTreeMap, BTreeSet};

use crate::bookmark::Bookmark;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub bookmarks: usize,
    /// Folders holding at least one bookmark, directly or through a
    /// subfolder. Empty folders leave no trace in the records.
    pub folders: usize,
    pub top_level: usize,
    pub tagged: usize,
    pub distinct_tags: usize,
    pub private: usize,
    pub with_description: usize,
    pub dated: usize,
    pub bookmarklets: usize,
    pub max_depth: usize,
}

pub fn stats(bookmarks: &[Bookmark], separator: &str) -> Stats {
    let mut folders: BTreeSet<Vec<&str>> = BTreeSet::new();
    let mut tags: BTreeSet<&str> = BTreeSet::new();
    let mut s = Stats {
        bookmarks: bookmarks.len(),
        ..Default::default()
    };

    for bm in bookmarks {
        let path: Vec<&str> = bm.folders(separator).collect();
        s.max_depth = s.max_depth.max(path.len());
        if path.is_empty() {
            s.top_level += 1;
        }
        for depth in 1..=path.len() {
            folders.insert(path[..depth].to_vec());
        }

        if !bm.tags.is_empty() {
            s.tagged += 1;
            tags.extend(bm.tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()));
        }
        if bm.private {
            s.private += 1;
        }
        if bm.description.is_some() {
            s.with_description += 1;
        }
        if bm.add_date.is_some() {
            s.dated += 1;
        }
        if bm.is_bookmarklet() {
            s.bookmarklets += 1;
        }
    }

    s.folders = folders.len();
    s.distinct_tags = tags.len();
    s
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderCount {
    pub path: Vec<String>,
    pub bookmarks: usize,
}

/// Bookmarks directly inside each folder path, largest first.
pub fn folder_counts(bookmarks: &[Bookmark], separator: &str) -> Vec<FolderCount> {
    let mut counts: BTreeMap<Vec<String>, usize> = BTreeMap::new();
    for bm in bookmarks {
        let path = bm.folders(separator).map(str::to_string).collect();
        *counts.entry(path).or_default() += 1;
    }

    let mut rows: Vec<FolderCount> = counts
        .into_iter()
        .map(|(path, bookmarks)| FolderCount { path, bookmarks })
        .collect();
    rows.sort_by(|a, b| b.bookmarks.cmp(&a.bookmarks).then_with(|| a.path.cmp(&b.path)));
    rows
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
