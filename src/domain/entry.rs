use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Title used when a feed item carries no `<title>`.
pub const NO_TITLE: &str = "No Title";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub title: String,
    pub link: String,
    pub published: String,
}

impl Entry {
    pub fn new(title: Option<String>, link: Option<String>, published: Option<String>) -> Self {
        Self {
            title: title.unwrap_or_else(|| NO_TITLE.to_string()),
            link: link.unwrap_or_default(),
            published: published.unwrap_or_default(),
        }
    }

    /// Parse the free-text publication date as RFC 2822, the format RSS uses.
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc2822(&self.published).ok()
    }
}

/// A headline tagged with its 1-based display position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedEntry {
    pub index: usize,
    #[serde(flatten)]
    pub entry: Entry,
}

/// Take the first `n` entries in feed order, numbered from 1.
pub fn top_entries(entries: &[Entry], n: usize) -> Vec<IndexedEntry> {
    entries
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, entry)| IndexedEntry {
            index: i + 1,
            entry: entry.clone(),
        })
        .collect()
}
