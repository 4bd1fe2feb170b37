//! The predicates that tie the extractors to the site's markup.
//! Most of them check whether an `id` or `class` attribute contains a marker substring.

use scraper::{ElementRef, Selector};

use crate::{Error, Result};

/// Compiled once and shared read-only between every page parse.
#[derive(Debug, Clone)]
pub struct Matchers {
    entry_list: Selector,
    entry_content: Selector,
    entry_author: Selector,
    entry_date: Selector,
    topic_list: Selector,
    content_body: Selector,
    list_item: Selector,
    anchor: Selector,
}

impl Matchers {
    pub fn new() -> Result<Self> {
        Ok(Self {
            entry_list: attr_contains("id", "entry-list")?,
            entry_content: attr_contains("class", "content")?,
            entry_author: attr_contains("class", "entry-author")?,
            entry_date: attr_contains("class", "entry-date")?,
            topic_list: attr_contains("class", "topic-list")?,
            content_body: attr_contains("id", "content-body")?,
            list_item: create_selector("li")?,
            anchor: create_selector("a")?,
        })
    }

    pub fn is_entry_list(&self, node: Option<ElementRef>) -> bool {
        matches(&self.entry_list, node)
    }

    pub fn is_entry_content(&self, node: Option<ElementRef>) -> bool {
        matches(&self.entry_content, node)
    }

    pub fn is_entry_author(&self, node: Option<ElementRef>) -> bool {
        matches(&self.entry_author, node)
    }

    pub fn is_entry_date(&self, node: Option<ElementRef>) -> bool {
        matches(&self.entry_date, node)
    }

    pub fn is_topic_list(&self, node: Option<ElementRef>) -> bool {
        matches(&self.topic_list, node)
    }

    pub fn is_content_body(&self, node: Option<ElementRef>) -> bool {
        matches(&self.content_body, node)
    }

    pub fn is_list_item(&self, node: Option<ElementRef>) -> bool {
        matches(&self.list_item, node)
    }

    pub fn is_anchor(&self, node: Option<ElementRef>) -> bool {
        matches(&self.anchor, node)
    }
}

#[inline]
fn matches(selector: &Selector, node: Option<ElementRef>) -> bool {
    node.is_some_and(|el| selector.matches(&el))
}

#[inline]
fn attr_contains(attr: &str, marker: &str) -> Result<Selector> {
    create_selector(&format!(r#"[{attr}*="{marker}"]"#))
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}
