use std::fmt;

use serde::Serialize;

/// A single forum post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub id: String,
    pub author: String,
    pub date: String,
    pub text: String,
}

/// A listing row pointing to a topic page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Topic {
    pub title: String,
    pub link: String,
    /// Number of entries the site reports for the topic. Zero when it couldn't be read.
    pub count: u64,
}

/// A topic from the daily top listing paired with its highlighted entry.
/// `topic.count` is always 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DailyTopRecord {
    pub topic: Topic,
    pub entry: Entry,
}

/// Parameters of a single retrieval. `limit` has already been resolved to a concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrievalConfig {
    pub page_number: usize,
    pub limit: usize,
    /// Switches search pagination to the site's "sukela" ordering.
    pub sukela: bool,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            page_number: crate::START_PAGE,
            limit: crate::DEFAULT_LIMIT,
            sukela: false,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.text)?;
        write!(f, "-- {} ({}) #{}", self.author, self.date, self.id)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<60} | {:>6}\n{}", self.title, self.count, self.link)
    }
}

impl fmt::Display for DailyTopRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.topic)?;
        write!(f, "{}", self.entry)
    }
}
