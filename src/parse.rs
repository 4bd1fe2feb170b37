use std::sync::Arc;

use scraper::{ElementRef, Html};
use tokio::task::spawn_blocking;

use crate::matchers::Matchers;
use crate::model::{Entry, Topic};
use crate::Result;

/// Parses the page on a blocking thread and returns the entries it contains.
pub(crate) async fn parse_entries(matchers: Arc<Matchers>, html: String) -> Result<Vec<Entry>> {
    let entries = spawn_blocking(move || extract_entries(&matchers, &html)).await?;
    Ok(entries)
}

/// Parses the page on a blocking thread and returns the topics it lists.
/// `origin` is prepended to every topic link.
pub(crate) async fn parse_topics(
    matchers: Arc<Matchers>,
    html: String,
    origin: String,
) -> Result<Vec<Topic>> {
    let topics = spawn_blocking(move || extract_topics(&matchers, &html, &origin)).await?;
    Ok(topics)
}

/// Extracts the entries of a topic page in document order.
/// A page without an entry list yields an empty `Vec`, which is how pages past the end look.
pub fn extract_entries(matchers: &Matchers, html: &str) -> Vec<Entry> {
    let doc = Html::parse_document(html);

    let Some(entry_list) = find(doc.root_element(), |n| matchers.is_entry_list(n)) else {
        return Vec::new();
    };

    find_all(entry_list, |n| matchers.is_entry_content(n))
        .into_iter()
        .map(|body| {
            let mut entry = Entry {
                text: text(body),
                ..Default::default()
            };
            // Author and date are siblings of the body, so look them up from the parent.
            let scope = body.parent().and_then(ElementRef::wrap).unwrap_or(body);
            if let Some(author) = find(scope, |n| matchers.is_entry_author(n)) {
                entry.author = text(author);
            }
            if let Some(date) = find(scope, |n| matchers.is_entry_date(n)) {
                let (id, date) = split_id_date(&text(date));
                entry.id = id;
                entry.date = date;
            }
            entry
        })
        .collect()
}

/// Extracts the topics of a listing page in document order.
pub fn extract_topics(matchers: &Matchers, html: &str, origin: &str) -> Vec<Topic> {
    let doc = Html::parse_document(html);

    let Some(topic_list) = find(doc.root_element(), |n| matchers.is_content_body(n))
        .and_then(|content| find(content, |n| matchers.is_topic_list(n)))
    else {
        return Vec::new();
    };

    find_all(topic_list, |n| matchers.is_list_item(n))
        .into_iter()
        .map(|item| {
            let link = find(item, |n| matchers.is_anchor(n))
                .and_then(|a| a.value().attr("href"))
                .map(|href| format!("{origin}{href}"))
                .unwrap_or_default();
            let (title, count) = split_title_count(&text(item));
            Topic { title, link, count }
        })
        .collect()
}

/// First element of the subtree rooted at `scope` (itself included) accepted by `matcher`.
pub fn find<'a, P>(scope: ElementRef<'a>, matcher: P) -> Option<ElementRef<'a>>
where
    P: Fn(Option<ElementRef<'a>>) -> bool,
{
    scope
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| matcher(Some(*el)))
}

/// Every element of the subtree accepted by `matcher`, in document order.
/// The subtree of a match is not searched any further, so nested matches are left out.
pub fn find_all<'a, P>(scope: ElementRef<'a>, matcher: P) -> Vec<ElementRef<'a>>
where
    P: Fn(Option<ElementRef<'a>>) -> bool,
{
    let mut found = Vec::new();
    if matcher(Some(scope)) {
        found.push(scope);
    } else {
        collect_outermost(scope, &matcher, &mut found);
    }
    found
}

fn collect_outermost<'a, P>(node: ElementRef<'a>, matcher: &P, found: &mut Vec<ElementRef<'a>>)
where
    P: Fn(Option<ElementRef<'a>>) -> bool,
{
    for child in node.children().filter_map(ElementRef::wrap) {
        if matcher(Some(child)) {
            found.push(child);
        } else {
            collect_outermost(child, matcher, found);
        }
    }
}

/// Text content of the subtree: every text node trimmed, empty ones dropped, joined by a space.
pub fn text(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"<id> <date>"` split on the first space. Without a space the whole text is the id.
fn split_id_date(id_date: &str) -> (String, String) {
    match id_date.split_once(' ') {
        Some((id, date)) => (id.trim().to_string(), date.trim().to_string()),
        None => (id_date.trim().to_string(), String::new()),
    }
}

/// `"<title> <count>"` split on the last space. A count that doesn't parse becomes 0.
fn split_title_count(title_count: &str) -> (String, u64) {
    match title_count.rsplit_once(' ') {
        Some((title, count)) => (title.trim().to_string(), count.trim().parse().unwrap_or(0)),
        None => (title_count.trim().to_string(), 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://eksisozluk.com";

    const ENTRY_PAGE: &str = r#"
        <html><body>
        <ul id="entry-list">
            <li>
                <div class="content">ilk entry <a href="/x">bkz</a></div>
                <footer>
                    <a class="entry-author">yazar bir</a>
                    <a class="entry-date permalink">12345 15.03.2020 14:22</a>
                </footer>
            </li>
            <li>
                <div class="content">ikinci entry</div>
                <footer><a class="entry-author">yazar iki</a></footer>
            </li>
            <li>
                <div class="content">üçüncü</div>
                <footer><a class="entry-date">777</a></footer>
            </li>
        </ul>
        </body></html>"#;

    const TOPIC_PAGE: &str = r#"
        <html><body>
        <div id="index-section"><ul class="topic-list"><li><a href="/sidebar">sidebar 1</a></li></ul></div>
        <div id="content-body">
            <ul class="topic-list partial">
                <li><a href="/gundem-basligi--1?a=popular">Gündem Başlığı <small>42</small></a></li>
                <li><a href="/yeni--2">yeni başlık <small>n/a</small></a></li>
                <li><a href="/tek--3">tek</a></li>
                <li>linksiz 5</li>
            </ul>
        </div>
        </body></html>"#;

    #[test]
    fn extracts_entries_in_document_order() {
        let m = Matchers::new().unwrap();
        let entries = extract_entries(&m, ENTRY_PAGE);

        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[0],
            Entry {
                id: "12345".into(),
                author: "yazar bir".into(),
                date: "15.03.2020 14:22".into(),
                text: "ilk entry bkz".into(),
            }
        );
        assert_eq!(entries[1].author, "yazar iki");
        assert_eq!(entries[1].id, "");
        assert_eq!(entries[1].date, "");
        assert_eq!(entries[2].author, "");
        assert_eq!(entries[2].id, "777");
        assert_eq!(entries[2].date, "");
    }

    #[test]
    fn page_without_entry_list_is_empty() {
        let m = Matchers::new().unwrap();
        let html = r#"<html><body><div class="content">orphan</div></body></html>"#;

        assert!(extract_entries(&m, html).is_empty());
        assert!(extract_entries(&m, "").is_empty());
    }

    #[test]
    fn extracts_topics_from_content_body_only() {
        let m = Matchers::new().unwrap();
        let topics = extract_topics(&m, TOPIC_PAGE, ORIGIN);

        assert_eq!(topics.len(), 4);
        assert_eq!(
            topics[0],
            Topic {
                title: "Gündem Başlığı".into(),
                link: "https://eksisozluk.com/gundem-basligi--1?a=popular".into(),
                count: 42,
            }
        );
        // Malformed count keeps the record.
        assert_eq!(topics[1].title, "yeni başlık");
        assert_eq!(topics[1].count, 0);
        assert_eq!(topics[2].title, "tek");
        assert_eq!(topics[2].count, 0);
        assert_eq!(topics[3].link, "");
        assert_eq!(topics[3].count, 5);
    }

    #[test]
    fn missing_topic_list_is_empty() {
        let m = Matchers::new().unwrap();
        let no_content = r#"<div id="index-section"><ul class="topic-list"><li>a 1</li></ul></div>"#;
        let no_list = r#"<div id="content-body"><ul><li>a 1</li></ul></div>"#;

        assert!(extract_topics(&m, no_content, ORIGIN).is_empty());
        assert!(extract_topics(&m, no_list, ORIGIN).is_empty());
    }

    #[test]
    fn nested_content_stays_inside_its_entry() {
        let m = Matchers::new().unwrap();
        let html = r#"
            <ul id="entry-list"><li>
                <div class="content">govde <span class="content-expander">devami</span></div>
                <footer><a class="entry-author">yazar</a><a class="entry-date">9 01.01.2024</a></footer>
            </li></ul>"#;

        let entries = extract_entries(&m, html);

        assert_eq!(
            entries,
            vec![Entry {
                id: "9".into(),
                author: "yazar".into(),
                date: "01.01.2024".into(),
                text: "govde devami".into(),
            }]
        );
    }

    #[test]
    fn nested_list_items_stay_inside_their_topic() {
        let m = Matchers::new().unwrap();
        let html = r#"
            <div id="content-body"><ul class="topic-list">
                <li><a href="/dis--1">dış</a> <ul><li>iç</li></ul> 7</li>
                <li><a href="/ikinci--2">ikinci 3</a></li>
            </ul></div>"#;

        let topics = extract_topics(&m, html, ORIGIN);

        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].title, "dış iç");
        assert_eq!(topics[0].count, 7);
        assert_eq!(topics[1].link, "https://eksisozluk.com/ikinci--2");
    }

    #[test]
    fn splits_composite_fields() {
        assert_eq!(
            split_id_date("12345 15.03.2020 14:22"),
            ("12345".to_string(), "15.03.2020 14:22".to_string())
        );
        assert_eq!(split_title_count("Gündem Başlığı 42"), ("Gündem Başlığı".to_string(), 42));
        assert_eq!(split_title_count("başlık -3"), ("başlık".to_string(), 0));
    }

    #[tokio::test]
    async fn parses_on_blocking_thread() {
        let m = Arc::new(Matchers::new().unwrap());

        let entries = parse_entries(m.clone(), ENTRY_PAGE.to_string()).await.unwrap();
        let topics = parse_topics(m, TOPIC_PAGE.to_string(), ORIGIN.to_string())
            .await
            .unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(topics.len(), 4);
    }
}
