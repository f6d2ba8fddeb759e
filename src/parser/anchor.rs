use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use super::entities;
use crate::bookmark::Bookmark;
use crate::error::AnchorError;

static OPEN_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)^<A(?:[^>"]|"[^"]*")*>"#).unwrap());
static ATTRIBUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z_][A-Za-z0-9_-]*)="(.*?)""#).unwrap());

pub(crate) const ANCHOR_CLOSE: &str = "</A>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Href,
    AddDate,
    LastModified,
    IconUri,
    Icon,
    Tags,
    Private,
    LastVisited,
}

impl Attribute {
    /// Attribute names are upper-case in every known exporter; anything else
    /// is ignored.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "HREF" => Some(Attribute::Href),
            "ADD_DATE" => Some(Attribute::AddDate),
            "LAST_MODIFIED" => Some(Attribute::LastModified),
            "ICON_URI" => Some(Attribute::IconUri),
            "ICON" => Some(Attribute::Icon),
            "TAGS" => Some(Attribute::Tags),
            "PRIVATE" => Some(Attribute::Private),
            "LAST_VISITED" => Some(Attribute::LastVisited),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Href => "HREF",
            Attribute::AddDate => "ADD_DATE",
            Attribute::LastModified => "LAST_MODIFIED",
            Attribute::IconUri => "ICON_URI",
            Attribute::Icon => "ICON",
            Attribute::Tags => "TAGS",
            Attribute::Private => "PRIVATE",
            Attribute::LastVisited => "LAST_VISITED",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A bookmark read from one anchor, plus the date attributes that were
/// present but could not be read.
#[derive(Debug, Clone)]
pub struct Anchor {
    pub bookmark: Bookmark,
    pub invalid_timestamps: Vec<(Attribute, String)>,
}

/// Read title and attributes from `<A ...>title</A>`.
///
/// Folder path and description are left empty; they depend on the
/// surrounding document.
pub fn extract_anchor(anchor: &str) -> Result<Bookmark, AnchorError> {
    read_anchor(anchor).map(|a| a.bookmark)
}

pub fn read_anchor(anchor: &str) -> Result<Anchor, AnchorError> {
    let close = rfind_anchor_close(anchor).ok_or(AnchorError::Unterminated)?;

    let open_end = OPEN_TAG_RE
        .find(anchor)
        .map(|m| m.end())
        .or_else(|| anchor.find('>').map(|i| i + 1))
        .unwrap_or(close)
        .min(close);

    let mut bm = Bookmark {
        title: entities::decode(&anchor[open_end..close]).into_owned(),
        ..Default::default()
    };
    let mut invalid_timestamps = Vec::new();

    for caps in ATTRIBUTE_RE.captures_iter(&anchor[..open_end]) {
        let Some(attr) = Attribute::from_name(&caps[1]) else {
            continue;
        };
        let value = &caps[2];
        match attr {
            Attribute::Href => bm.href = value.to_string(),
            Attribute::Icon => bm.icon = Some(value.to_string()),
            Attribute::IconUri => bm.icon_uri = Some(value.to_string()),
            Attribute::Tags => bm.tags = split_tags(value),
            Attribute::Private => bm.private = value == "1",
            Attribute::AddDate | Attribute::LastModified | Attribute::LastVisited => {
                let ts = parse_timestamp(value);
                if ts.is_none() {
                    invalid_timestamps.push((attr, value.to_string()));
                }
                match attr {
                    Attribute::AddDate => bm.add_date = ts,
                    Attribute::LastModified => bm.last_modified = ts,
                    _ => bm.last_visited = ts,
                }
            }
        }
    }

    Ok(Anchor {
        bookmark: bm,
        invalid_timestamps,
    })
}

/// Byte offset of the last `</A>`, ignoring ASCII case.
pub(crate) fn rfind_anchor_close(s: &str) -> Option<usize> {
    s.to_ascii_uppercase().rfind(ANCHOR_CLOSE)
}

fn split_tags(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(str::to_string).collect()
}

/// Unix epoch seconds. Out-of-range values count as unreadable.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    value
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}
