use std::time::Duration;

use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};

use crate::{info_time, Error, Result};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";
const MAX_REDIRECTS: usize = 10;

/// A fetched page: the URL it was finally served from (after redirects) and its markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub html: String,
}

/// The only I/O boundary of the scraper.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

/// `Fetch` over HTTP(S), following redirects.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    /// Requests a page and returns its final URL and HTML.
    /// Server errors fail the request, any other status is handed to the parser as is.
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let res = self.client.get(url).send().await?;
        let status = res.status();
        let final_url = res.url().to_string();

        if status.is_server_error() {
            return Err(Error::HttpStatus {
                url: final_url,
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            info_time!("{} responded with {}", final_url, status);
        }

        let html = res.text().await?;
        Ok(FetchedPage {
            url: final_url,
            html,
        })
    }
}
