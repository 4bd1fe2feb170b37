use std::future::Future;
use std::sync::Arc;

use chrono::Local;

use crate::matchers::Matchers;
use crate::model::{DailyTopRecord, Entry, RetrievalConfig, Topic};
use crate::parse::{parse_entries, parse_topics};
use crate::request::{Fetch, HttpFetcher};
use crate::{info_time, Result, BASE_URL, DEBE_PATH, POPULAR_TOPICS_PATH, SUKELA_PARAM};

/// Requests pages `start, start + 1, ...` through `fetch_page` and collects their records
/// until `limit` records are gathered or a page comes back empty.
///
/// Never returns more than `limit` records: the surplus of the last page is dropped.
/// With `limit == 0` no page is requested. The first error aborts the whole walk.
pub async fn accumulate<T, F, Fut>(start: usize, limit: usize, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut records = Vec::with_capacity(limit.min(64));
    let mut page = start;

    while records.len() < limit {
        let mut batch = fetch_page(page).await?;
        if batch.is_empty() {
            info_time!("found EMPTY page {}", page);
            break;
        }

        let missing = limit - records.len();
        if batch.len() > missing {
            batch.truncate(missing);
            records.append(&mut batch);
            break;
        }
        records.append(&mut batch);
        page += 1;
    }

    Ok(records)
}

/// Retrieves entries and topic listings from the site through a `Fetch` implementation.
pub struct Scraper<F = HttpFetcher> {
    fetcher: F,
    matchers: Arc<Matchers>,
    origin: String,
}

impl<F: Fetch> Scraper<F> {
    pub fn new(fetcher: F) -> Result<Self> {
        Self::with_origin(fetcher, BASE_URL)
    }

    /// Same as `new` but resolves endpoints and topic links against `origin` instead of the live site.
    pub fn with_origin(fetcher: F, origin: impl Into<String>) -> Result<Self> {
        let origin: String = origin.into();
        Ok(Self {
            fetcher,
            matchers: Arc::new(Matchers::new()?),
            origin: origin.trim_end_matches('/').to_string(),
        })
    }

    /// Entries of the topic `search_text` resolves to, starting at `config.page_number`.
    ///
    /// The search URL is requested once to follow the site's redirect to the topic page;
    /// pagination is then applied to the redirected URL.
    pub async fn get_entries(&self, search_text: &str, config: RetrievalConfig) -> Result<Vec<Entry>> {
        if config.limit == 0 {
            return Ok(Vec::new());
        }
        let start_time = Local::now();

        let query: String = url::form_urlencoded::byte_serialize(search_text.as_bytes()).collect();
        let search_url = format!("{}/?q={}", self.origin, query);
        let resolved = self.fetcher.fetch(&search_url).await?.url;
        info_time!("Search '{}' resolved to {}", search_text, resolved);

        let sukela = config.sukela;
        let entries = accumulate(config.page_number, config.limit, |page| {
            self.fetch_entries(page_url(&resolved, page, sukela))
        })
        .await?;

        info_time!(start_time, "Collected {} entries for '{}'", entries.len(), search_text);
        Ok(entries)
    }

    /// Popular topics, starting at `config.page_number`.
    pub async fn get_popular_topics(&self, config: RetrievalConfig) -> Result<Vec<Topic>> {
        let start_time = Local::now();
        let base_url = format!("{}{}", self.origin, POPULAR_TOPICS_PATH);

        let topics = accumulate(config.page_number, config.limit, |page| {
            self.fetch_topics(page_url(&base_url, page, false))
        })
        .await?;

        info_time!(start_time, "Collected {} popular topics", topics.len());
        Ok(topics)
    }

    /// Today's top entries: the single daily-top listing page, each topic paired with
    /// the first entry of its own page. `config.page_number` is ignored.
    pub async fn get_debe(&self, config: RetrievalConfig) -> Result<Vec<DailyTopRecord>> {
        if config.limit == 0 {
            return Ok(Vec::new());
        }
        let start_time = Local::now();

        let topics = self
            .fetch_topics(format!("{}{}", self.origin, DEBE_PATH))
            .await?;

        let mut debe = Vec::with_capacity(topics.len().min(config.limit));
        for mut topic in topics.into_iter().take(config.limit) {
            // The listing shows exactly one entry per topic, whatever count the page reports.
            topic.count = 1;
            let entry = self
                .fetch_entries(topic.link.clone())
                .await?
                .into_iter()
                .next()
                .unwrap_or_default();
            debe.push(DailyTopRecord { topic, entry });
        }

        info_time!(start_time, "Collected {} daily top entries", debe.len());
        Ok(debe)
    }

    async fn fetch_entries(&self, url: String) -> Result<Vec<Entry>> {
        info_time!("URL to check: {}", url);
        let page = self.fetcher.fetch(&url).await?;
        parse_entries(self.matchers.clone(), page.html).await
    }

    async fn fetch_topics(&self, url: String) -> Result<Vec<Topic>> {
        info_time!("URL to check: {}", url);
        let page = self.fetcher.fetch(&url).await?;
        parse_topics(self.matchers.clone(), page.html, self.origin.clone()).await
    }
}

/// Appends the page parameter (and the sukela ordering) to `base`.
fn page_url(base: &str, page: usize, sukela: bool) -> String {
    let mut url = format!("{base}?p={page}");
    if sukela {
        url.push('&');
        url.push_str(SUKELA_PARAM);
    }
    url
}
