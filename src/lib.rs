//! Scraper for eksisozluk: walks paginated entry and topic listings until a requested
//! number of records has been collected.

mod error;
#[doc(hidden)]
pub mod macros;
pub mod cli;
pub mod matchers;
pub mod model;
pub mod output;
pub mod parse;
pub mod process;
pub mod request;

pub use error::{Error, Result};
pub use model::{DailyTopRecord, Entry, RetrievalConfig, Topic};
pub use process::{accumulate, Scraper};
pub use request::{Fetch, FetchedPage, HttpFetcher};

/// Origin every relative topic link and endpoint is resolved against.
pub const BASE_URL: &str = "https://eksisozluk.com";
const POPULAR_TOPICS_PATH: &str = "/basliklar/populer";
const DEBE_PATH: &str = "/debe";
/// Query parameter appended to search pages when the `sukela` ordering is requested.
const SUKELA_PARAM: &str = "a=nice";

pub const START_PAGE: usize = 1;
/// Used when the caller doesn't provide a limit.
pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
